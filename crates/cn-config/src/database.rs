//! Database file location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Used when the platform has no data directory.
const FALLBACK_PATH: &str = "data/casenote.db";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the database file. Empty means the per-user data directory.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }

    /// Resolve the database file path.
    ///
    /// An explicit `path` wins; otherwise `<data dir>/casenote/casenote.db`,
    /// falling back to `data/casenote.db` relative to the working directory.
    /// `":memory:"` is passed through untouched.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if self.is_configured() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(FALLBACK_PATH),
            |dir| dir.join("casenote").join("casenote.db"),
        )
    }
}
