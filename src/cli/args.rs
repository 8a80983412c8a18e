//! CLI argument definitions using clap
//!
//! Commands:
//! - mockapi serve --api <path> [--config <path>] [--host <host>] [--port <port>] [--data <path>]
//! - mockapi check --api <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mockapi - serve a mock backend from an API description
#[derive(Parser, Debug)]
#[command(name = "mockapi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the operations declared in an API document
    Serve {
        /// Path to the API document (JSON)
        #[arg(long)]
        api: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Seed data: JSON object mapping resource paths to data
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Load an API document and list its operations
    Check {
        /// Path to the API document (JSON)
        #[arg(long)]
        api: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "mockapi", "serve", "--api", "petstore.json", "--port", "9000", "--data", "pets.json",
        ])
        .unwrap();
        match cli.command {
            Command::Serve { api, port, data, config, host } => {
                assert_eq!(api, PathBuf::from("petstore.json"));
                assert_eq!(port, Some(9000));
                assert_eq!(data, Some(PathBuf::from("pets.json")));
                assert!(config.is_none());
                assert!(host.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_api() {
        assert!(Cli::try_parse_from(["mockapi", "check"]).is_err());
    }
}
