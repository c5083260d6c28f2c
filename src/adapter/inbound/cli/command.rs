//! Command-line interface definitions.
//!
//! Defines the CLI structure for the callback-harness application using
//! `clap`. The CLI runs the built-in callback scenarios, lists them, and
//! manages the configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;
use crate::infrastructure::config::delivery::DeliveryKind;

/// Drive loopback callbacks through delivery contexts and check they arrive
#[derive(Parser, Debug)]
#[command(name = "callback-harness")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the callback-harness CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run callback scenarios and report which deliveries arrived
    Run(RunArgs),

    /// List the built-in scenarios
    Scenarios,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `callback-harness config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` subcommand.
///
/// Flags override the matching configuration values for this run only.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file. Defaults apply if it does not exist.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Scenario to run (repeatable). Runs the whole catalog when omitted.
    #[arg(short, long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Delivery context to register listeners on. `inline` delivers
    /// synchronously and does not exercise cross-thread delivery.
    #[arg(long)]
    pub delivery: Option<DeliveryKind>,

    /// Timeout for each expected callback, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// How long the silence scenario listens, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub silence_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_command_factory_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "callback-harness");
        assert!(cmd.get_version().is_some());
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["callback-harness", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.scenarios.is_empty());
        assert!(args.delivery.is_none());
        assert!(args.timeout_ms.is_none());
        assert_eq!(args.config, paths::default_config());
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "callback-harness",
            "run",
            "-s",
            "destroyed",
            "--scenario",
            "silence",
            "--delivery",
            "tokio",
            "--timeout-ms",
            "250",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.scenarios, vec!["destroyed", "silence"]);
        assert_eq!(args.delivery, Some(DeliveryKind::Tokio));
        assert_eq!(args.timeout_ms, Some(250));
    }

    #[test]
    fn test_parse_rejects_unknown_delivery() {
        assert!(Cli::try_parse_from(["callback-harness", "run", "--delivery", "smoke"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["callback-harness", "scenarios", "--json", "-vv"]).unwrap();
        assert!(matches!(cli.command, Commands::Scenarios));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli =
            Cli::try_parse_from(["callback-harness", "config", "init", "out.toml", "--force"])
                .unwrap();
        let Commands::Config(ConfigCommand::Init(args)) = cli.command else {
            panic!("expected config init");
        };
        assert_eq!(args.path, PathBuf::from("out.toml"));
        assert!(args.force);
    }
}
