#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/abode-rs/abode/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod regressor;
pub mod ridge;

pub use error::{ModelError, Result};
pub use evaluate::train_and_evaluate;
pub use metrics::{EvaluationMetrics, mean_squared_error, r2_score};
pub use regressor::Regressor;
pub use ridge::{RidgeConfig, RidgeRegression};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
