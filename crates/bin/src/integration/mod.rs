//! Glue between the command line and the abode library.
//!
//! Artifact location, form parsing from `Key=Value` arguments, log setup and
//! terminal reports.

pub(crate) mod artifact_store;
pub(crate) mod form_input;
pub(crate) mod logging;
pub(crate) mod report;
