//! Default location of the persisted model.

use std::path::PathBuf;

/// Platform data directory for abode.
///
/// - Linux: `~/.local/share/abode/`
/// - macOS: `~/Library/Application Support/abode/`
/// - Windows: `%APPDATA%\abode\`
pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("abode")
}

/// Default model artifact path.
pub(crate) fn default_artifact_path() -> PathBuf {
    default_data_dir().join("model.json")
}

/// The artifact path to use: an explicit one wins over the default.
pub(crate) fn resolve_artifact_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(default_artifact_path)
}
