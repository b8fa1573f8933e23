#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/abode-rs/abode/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod categorical;
pub mod encoder;
pub mod error;
pub mod numeric;
pub mod prepare;
pub mod split;
pub mod target;

pub use encoder::{FeatureColumns, FeatureEncoder, FeatureMatrix};
pub use error::{FeatureError, Result};
pub use prepare::{PreparedData, prepare_features};
pub use split::{SplitConfig, TrainTestSplit, train_test_split};
pub use target::{inverse_log_price, log_price};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
