use clap::{CommandFactory, Parser};
use tracing::debug;

use client::{ApiVersion, ManagementClient};
use grantsctl::cli::{self, CommandError};
use grantsctl::config::{Config, ConfigError};

fn main() -> Result<(), CommandError> {
    let cli = cli::Cli::parse();

    if cli.markdown_help {
        clap_markdown::print_help_markdown::<cli::Cli>();
        std::process::exit(0);
    }

    let config = Config::load(&cli.config)?;
    config.init_logger();

    let client = ManagementClient::builder()
        .version(ApiVersion::V2)
        .build(&config.client_config()?)?;
    debug!(api = %client.info(), "management client ready");

    if let Some(command) = cli.command {
        if let Err(e) = cli::execute(&client, command) {
            eprintln!("Error executing command: {e}");
            std::process::exit(1);
        } else {
            Ok(())
        }
    } else {
        cli::Cli::command()
            .print_help()
            .map_err(|e| CommandError::from(ConfigError::from(e)))?;
        std::process::exit(0);
    }
}
