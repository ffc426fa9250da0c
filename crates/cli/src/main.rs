//! `cfctl`: drive a Cloud Foundry style platform API from the command line.
//!
//! Each invocation runs one registered command through the requirement
//! pipeline: flags are parsed, preconditions are checked in order, and only
//! then does the command act on the platform.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cfctl_commands::{Dependencies, RequirementFactory, Runner, TerminalUi, Ui, registry};
use cfctl_infra::RepositoryLocator;

mod config;
mod exit_codes;

#[derive(Debug, Parser)]
#[command(name = "cfctl", version)]
#[command(about = "Scale apps, manage env variables and map domains", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "CFCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Log requests and requirement checks to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CFCTL_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Command to run
    command: Option<String>,

    /// Arguments and flags of the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    cfctl_observability::init(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "start-up failed");
            eprintln!("FAILED\n{e:#}");
            exit_codes::GENERAL_ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let mut ui = TerminalUi::new();

    let Some(name) = cli.command.as_deref().filter(|n| registry::names().contains(n)) else {
        if let Some(unknown) = &cli.command {
            ui.failed(&format!("'{unknown}' is not a registered command."));
        }
        ui.say(&format!("Commands: {}", registry::names().join(", ")));
        return Ok(exit_codes::USAGE_ERROR);
    };

    let config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let repositories =
        RepositoryLocator::cloud_controller(&config, Duration::from_secs(cli.timeout))
            .context("Failed to set up the API client")?;

    let deps = Dependencies::new(&config, &repositories);
    let command = registry::build(name, deps)
        .with_context(|| format!("command '{name}' is listed but not constructible"))?;

    let runner = Runner::new(RequirementFactory::new(&config, &repositories));
    let outcome = runner.run(command.as_ref(), &cli.args, &mut ui);
    tracing::debug!(command = name, ?outcome, "finished");

    Ok(exit_codes::for_outcome(outcome, ui.has_failed()))
}
