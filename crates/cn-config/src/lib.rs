//! # cn-config
//!
//! Layered configuration loading for Casenote using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CASENOTE_*` prefix, `__` as separator)
//! 2. Project-level `.casenote/config.toml`
//! 3. User-level `~/.config/casenote/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CASENOTE_SERVER__PORT` -> `server.port`,
//! `CASENOTE_DATABASE__PATH` -> `database.path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use cn_config::CasenoteConfig;
//!
//! let config = CasenoteConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_address().expect("host"));
//! ```

mod database;
mod error;
mod general;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
const LOCAL_CONFIG: &str = ".casenote/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CasenoteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CasenoteConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CASENOTE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("casenote").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = CasenoteConfig::default();
        assert_eq!(config.server.port, 8000);
        assert!(!config.database.is_configured());
        assert_eq!(config.general.log_filter, "info");
    }

    #[test]
    fn figment_builds_without_files() {
        Jail::expect_with(|_jail| {
            let config: CasenoteConfig = CasenoteConfig::figment().extract()?;
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.server.port, 8000);
            Ok(())
        });
    }

    #[test]
    fn project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_dir(".casenote")?;
            jail.create_file(
                LOCAL_CONFIG,
                r#"
                [server]
                port = 8123

                [database]
                path = "practice.db"
                "#,
            )?;

            let config: CasenoteConfig = CasenoteConfig::figment().extract()?;
            assert_eq!(config.server.port, 8123);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.database.path, "practice.db");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_dir(".casenote")?;
            jail.create_file(LOCAL_CONFIG, "[server]\nport = 8123\n")?;
            jail.set_env("CASENOTE_SERVER__PORT", "9001");
            jail.set_env("CASENOTE_GENERAL__LOG_FILTER", "debug");

            let config: CasenoteConfig = CasenoteConfig::figment().extract()?;
            assert_eq!(config.server.port, 9001);
            assert_eq!(config.general.log_filter, "debug");
            Ok(())
        });
    }

    #[test]
    fn bad_port_is_a_figment_error() {
        Jail::expect_with(|jail| {
            jail.set_env("CASENOTE_SERVER__PORT", "not-a-port");
            let err = CasenoteConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::Figment(_)));
            Ok(())
        });
    }
}
