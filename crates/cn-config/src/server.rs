//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Port the desktop shell expects the backend on.
const fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind. Loopback by default: the app is single-user and local.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the host is empty.
    pub fn bind_address(&self) -> Result<String, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(format!("{}:{}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
