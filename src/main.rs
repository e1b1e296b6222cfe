use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use pyskel::error::{exit_code_for, ScaffoldError};

mod commands;

/// Everything is driven by the interview; there are no other flags.
#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Interactive scaffolding for new Python projects", long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    pyskel::logging::init();

    match commands::create::execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ScaffoldError>() {
                // confirm() already said "cancelled"
                Some(ScaffoldError::Cancelled) => {}
                Some(ScaffoldError::Aborted) => eprintln!("interview aborted"),
                _ => eprintln!("{} {e:#}", "error:".red().bold()),
            }
            ExitCode::from(exit_code_for(&e))
        }
    }
}
