use std::process::ExitCode;

use clap::{CommandFactory, Parser};

mod commands;
mod printer;

use commands::Command;
use x7z_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "x7z", version, about = "List and extract archives through 7-Zip")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::L(args)) => commands::list::run(args),
        Some(Command::X(args)) => commands::extract::run(args),
        Some(Command::T(_)) | None => print_help(),
    }
}

fn print_help() -> ExitCode {
    match Cli::command().print_help() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[error] {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
