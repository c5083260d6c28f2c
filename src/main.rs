use clap::Parser;

use callback_harness::adapter::inbound::cli::command::{Cli, ColorChoice};
use callback_harness::adapter::inbound::cli::{self, output};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = cli::execute(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
