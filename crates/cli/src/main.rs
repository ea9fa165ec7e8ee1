use std::process::ExitCode;

use clap::Parser;

mod commands;
mod input;
mod printer;
mod settings;

use commands::Command;
use glint_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "glint",
    version,
    about = "Prefix fuzzy filter with highlighting",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Filter(args) => commands::filter::run(args),
        Command::Tokenize(args) => commands::tokenize::run(args),
    }
}
