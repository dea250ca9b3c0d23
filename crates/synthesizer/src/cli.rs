//! Command-line interface definitions

use clap::{Parser, Subcommand};
use config::DEFAULT_CONFIG_DIR;
use std::path::PathBuf;

/// Environment-keyed CloudFormation stack synthesizer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize templates for an environment
    Synth {
        /// Environment whose configuration document drives synthesis
        #[arg(long, short)]
        environment: String,

        /// Directory holding <environment>.json documents
        #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
        config_dir: PathBuf,

        /// Directory templates and the manifest are written into
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Check an environment's configuration document
    Validate {
        /// Environment whose configuration document is checked
        #[arg(long, short)]
        environment: String,

        /// Directory holding <environment>.json documents
        #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
        config_dir: PathBuf,
    },
    /// Write an example configuration document for a new environment
    Example {
        /// Environment the example document is named after
        #[arg(long, short)]
        environment: String,

        /// Directory holding <environment>.json documents
        #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
        config_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_synth_defaults() {
        let cli = Cli::parse_from(["stackforge", "synth", "--environment", "networking-dev"]);
        match cli.command {
            Command::Synth {
                environment,
                config_dir,
                out,
            } => {
                assert_eq!(environment, "networking-dev");
                assert_eq!(config_dir, PathBuf::from("config"));
                assert_eq!(out, PathBuf::from("out"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_a_config_dir() {
        let cli = Cli::parse_from([
            "stackforge",
            "validate",
            "-e",
            "networking-prod",
            "--config-dir",
            "deploy/config",
        ]);
        match cli.command {
            Command::Validate {
                environment,
                config_dir,
            } => {
                assert_eq!(environment, "networking-prod");
                assert_eq!(config_dir, PathBuf::from("deploy/config"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
