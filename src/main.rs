// pscan - A concurrent TCP connect port scanner

use clap::{CommandFactory, Parser};
use pscan::cli::{self, Args};
use pscan::error::{CliError, ConfigError};
use pscan::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Bare invocation prints usage and succeeds.
    if std::env::args_os().len() <= 1 {
        let mut command = Args::command();
        if command.print_help().is_err() {
            return ExitCode::FAILURE;
        }
        println!();
        return ExitCode::SUCCESS;
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            if matches!(e, CliError::Config(ConfigError::MissingTarget)) {
                output::print_hint("Use --target or -t to specify a target host");
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; stdout carries only scan output.
fn init_tracing(verbose: bool) {
    let filter = if verbose { "pscan=debug" } else { "pscan=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
