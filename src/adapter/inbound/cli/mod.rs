//! CLI module graph.

pub mod command;
pub mod config;
pub mod output;
pub mod paths;
pub mod run;
pub mod scenarios;

use crate::error::Result;
use command::{Cli, Commands, ConfigCommand};

/// Dispatch a parsed command line to its handler.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Scenarios => scenarios::list(),
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(&args.path, args.force)
        }
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => {
            config::execute_validate(&args.config)
        }
    }
}
