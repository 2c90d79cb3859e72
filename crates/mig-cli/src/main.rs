//! mig CLI - a minimal sequential schema migration tool

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{make, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage(err),
    };

    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Some(Commands::Make(args)) => make::execute(args, &cli.global).await,
        Some(Commands::Run(args)) => run::execute(args, &cli.global).await,
        None => {
            if let Err(e) = Cli::command().print_help() {
                log::debug!("Failed to print usage: {}", e);
            }
            return std::process::ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::ExitCode::from(*code as u8),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// Unknown commands and missing arguments print usage without failing
fn usage(err: clap::Error) -> std::process::ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            // Logging is not set up yet
            err.print().ok();
            std::process::ExitCode::SUCCESS
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,mig=debug,mig_core=debug,mig_db=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
