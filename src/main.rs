use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use phpantom_deduce::command::{self, CommandOutput, DeduceArgs};
use phpantom_deduce::config::Config;
use phpantom_deduce::error::CommandError;

/// Environment variable holding a `tracing` filter that overrides the
/// configured log level.
const LOG_ENV: &str = "PHPANTOM_LOG";

fn main() -> ExitCode {
    let args = DeduceArgs::parse();

    let working_dir = std::env::current_dir().unwrap_or_default();
    let outcome = match Config::load(args.config.as_deref(), &working_dir) {
        Ok(config) => {
            init_logging(config.log_level.as_deref());
            command::run(&args, &config, &mut std::io::stdin().lock())
        }
        Err(err) => {
            init_logging(None);
            Err(CommandError::from(err))
        }
    };

    let output = CommandOutput::from_outcome(&outcome);
    match serde_json::to_string(&output) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            tracing::error!(%err, "failed to serialise command output");
            return ExitCode::FAILURE;
        }
    }

    if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Log to stderr so stdout carries nothing but the JSON result.
fn init_logging(configured_level: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured_level.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
