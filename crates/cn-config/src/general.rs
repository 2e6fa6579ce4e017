//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `CASENOTE_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}
