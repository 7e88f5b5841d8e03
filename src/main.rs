//! Promptml: structured prompt templates with typed variables, reusable
//! parts, and conditional rendering.
//!
//! This is the main entry point for the `promptml` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

use promptml::cli::Cli;
use promptml::commands;
use promptml::error::PromptError;
use promptml::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {err:#}");

            // Library failures carry their own exit codes; anything else
            // (I/O, bad flags) is a user error.
            let code = err
                .downcast_ref::<PromptError>()
                .map(PromptError::exit_code)
                .unwrap_or(exit_codes::USER_ERROR);
            ExitCode::from(code as u8)
        }
    }
}
