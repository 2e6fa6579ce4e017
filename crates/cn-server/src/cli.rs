use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cn_config::CasenoteConfig;

/// Top-level CLI parser for the `casenote` binary.
#[derive(Debug, Parser)]
#[command(
    name = "casenote",
    version,
    about = "Casenote - client and note records for a therapy practice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,

        /// Database file (overrides database.path)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create the database and apply the schema, then exit.
    InitDb {
        /// Database file (overrides database.path)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

impl Cli {
    /// Fold command-line flags over the loaded configuration.
    pub fn apply_overrides(&self, config: &mut CasenoteConfig) {
        let db = match &self.command {
            Commands::Serve { host, port, db } => {
                if let Some(host) = host {
                    config.server.host.clone_from(host);
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                db
            }
            Commands::InitDb { db } => db,
        };
        if let Some(db) = db {
            config.database.path = db.display().to_string();
        }
    }

    /// Fallback log filter when `CASENOTE_LOG` is unset.
    #[must_use]
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands};
    use cn_config::CasenoteConfig;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from([
            "casenote", "serve", "--host", "0.0.0.0", "--port", "9100", "--db", "/tmp/p.db",
        ])
        .expect("cli should parse");
        let mut config = CasenoteConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.path, "/tmp/p.db");
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["casenote", "serve"]).expect("cli should parse");
        let mut config = CasenoteConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.port, 8000);
        assert!(!config.database.is_configured());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["casenote", "init-db", "--quiet"]).expect("cli should parse");
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::InitDb { db: None }));
        assert_eq!(cli.log_level("info"), "error");
    }

    #[test]
    fn verbose_raises_log_level() {
        let cli = Cli::try_parse_from(["casenote", "-v", "serve"]).expect("cli should parse");
        assert_eq!(cli.log_level("warn"), "debug");
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["casenote", "serve", "--port", "http"]).is_err());
    }
}
