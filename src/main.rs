//! Podshift CLI - translate Docker Compose documents into Podman artifacts
//!
//! Usage: podshift <COMMAND>
//!
//! Commands:
//!   translate  Translate a Compose file (podman-compose, quadlet, kube)
//!   check      Run the rules and print the change log
//!   diff       Diff the input against the translated artifact
//!   rules      List translation rules
//!   formats    List output formats

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let success = match &cli.command {
        Commands::Translate {
            input,
            format,
            output,
        } => commands::translate::cmd_translate(
            input,
            format.as_deref(),
            output.as_deref(),
            config,
            cli.json,
            cli.verbose,
        )?,
        Commands::Check { input } => {
            commands::check::cmd_check(input, config, cli.json, cli.verbose)?
        }
        Commands::Diff { input, format } => {
            commands::diff::cmd_diff(input, *format, config, cli.json, cli.verbose)?
        }
        Commands::Rules => commands::discovery::cmd_rules(cli.json)?,
        Commands::Formats => commands::discovery::cmd_formats(cli.json)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
