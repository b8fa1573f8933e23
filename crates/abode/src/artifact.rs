//! Persisted model: frozen encoder, fit estimator and its scores.

use crate::error::Result;
use abode_features::FeatureEncoder;
use abode_model::{EvaluationMetrics, RidgeRegression};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Everything a prediction process needs, stored as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Crate version that wrote the artifact
    pub version: String,
    /// When training finished
    pub created_at: DateTime<Utc>,
    /// Encoder fit on the training partition
    pub encoder: FeatureEncoder,
    /// Fit estimator
    pub model: RidgeRegression,
    /// Scores from training
    pub metrics: EvaluationMetrics,
}

impl ModelArtifact {
    /// Bundle a trained encoder and model, stamped now.
    pub fn new(encoder: FeatureEncoder, model: RidgeRegression, metrics: EvaluationMetrics) -> Self {
        Self {
            version: crate::VERSION.to_string(),
            created_at: Utc::now(),
            encoder,
            model,
            metrics,
        }
    }

    /// Write the artifact as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    /// Read an artifact written by [`ModelArtifact::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), version = %artifact.version, "model artifact loaded");
        Ok(artifact)
    }
}
