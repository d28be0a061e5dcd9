// Crew Helper - interactive multi-role planning assistant
// Main entry point

use clap::Parser;
use crossterm::style::Stylize;
use std::process::ExitCode;

use crew_helper::cli::{execute, Args, TerminalPrompter};
use crew_helper::providers::create_provider;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    crew_helper::logging::init_tracing(args.verbose);

    let mut prompter = match TerminalPrompter::new() {
        Ok(prompter) => prompter,
        Err(e) => {
            eprintln!("{} Failed to initialize terminal input: {:#}", "✗".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    match execute(&args, &mut prompter, create_provider).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Fatal error: {:?}", e);
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
