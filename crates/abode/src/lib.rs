#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/abode-rs/abode/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod predictor;
pub mod request;
pub mod train;

// Re-export main types from sub-crates
pub use abode_data as data;
pub use abode_features as features;
pub use abode_model as model;

pub use artifact::ModelArtifact;
pub use catalog::FormOptions;
pub use error::{PredictError, Result};
pub use predictor::PricePredictor;
pub use request::PredictionRequest;
pub use train::{TrainConfig, train};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
