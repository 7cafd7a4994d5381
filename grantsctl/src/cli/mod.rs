use clap::{Parser, Subcommand};

use client::{ManagementClient, ManagementError};

use crate::VERSION;
use crate::config::ConfigError;

mod grants;

#[derive(Parser, Debug)]
#[command(name = "grantsctl")]
#[command(about = "Manage Management API client grants", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Path to config file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "/etc/grantsctl/grantsctl.toml"
    )]
    pub config: String,
    #[arg(long, hide = true)]
    pub markdown_help: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Management API error: {0}")]
    Management(#[from] ManagementError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Generic error: {0}")]
    Generic(String),
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Grants(grants::GrantsCommand),
}

pub fn execute(client: &ManagementClient, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Grants(cmd) => cmd.execute(client),
    }
}

pub trait Command {
    fn execute(&self, client: &ManagementClient) -> Result<(), CommandError>;
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_default_config() {
        let cli = Cli::try_parse_from(["grantsctl"]).map_err(|e| e.to_string());
        assert_eq!(
            cli.map(|c| c.config),
            Ok("/etc/grantsctl/grantsctl.toml".to_string())
        );
    }
}
