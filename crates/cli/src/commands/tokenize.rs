use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use glint_engine::{Token, Tokenizer};

use crate::commands::{CommandResult, report};
use crate::settings::{ConfigFlags, load_config};

#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Text to split
    pub text: String,

    /// Show the uppercased query tokens instead of field spans
    #[arg(long)]
    pub query: bool,

    /// Config file; defaults to the user config when present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub flags: ConfigFlags,
}

pub fn run(args: TokenizeArgs) -> ExitCode {
    report(execute(args, &mut io::stdout().lock()).map(|_| ExitCode::SUCCESS))
}

fn execute(args: TokenizeArgs, out: &mut impl Write) -> CommandResult<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.flags.apply(&mut config);
    let tokenizer = Tokenizer::new(&config.tokenizer);

    if args.query {
        for token in tokenizer.query_tokens(&args.text).iter() {
            writeln!(out, "{token}")?;
        }
    } else {
        for token in tokenizer.tokenize(&args.text) {
            writeln!(out, "{}", format_token(&token))?;
        }
    }

    Ok(())
}

/// Span kind, then its text quoted.
fn format_token(token: &Token) -> String {
    let kind = if token.is_token { "word" } else { "sep" };
    format!("{kind:<4} {:?}", token.text)
}

#[cfg(test)]
#[path = "tokenize_tests.rs"]
mod tests;
