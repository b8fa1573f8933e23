#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/abode-rs/abode/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod impute;
pub mod load;
pub mod normalize;
pub mod outlier;
pub mod pipeline;
pub mod range;
pub mod schema;

pub use error::{DataError, Result};
pub use pipeline::{Pipeline, PipelineConfig, Stage};
pub use schema::{Bounds, NumericField, PropertyType};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
