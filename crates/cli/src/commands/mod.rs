pub mod filter;
pub mod tokenize;

use std::process::ExitCode;

use clap::Subcommand;
pub use filter::FilterArgs;
pub use tokenize::TokenizeArgs;

/// Common result type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter JSON items by a query and print highlighted matches.
    ///
    /// Example:
    ///   glint filter 'hel wor' --input notes.json --field key
    ///   cat notes.ndjson | glint filter --same-order-first -n 5 'plan hello'
    Filter(FilterArgs),

    /// Show how a text is split into tokens.
    ///
    /// Example:
    ///   glint tokenize 'parseHTTPResponse_v2'
    Tokenize(TokenizeArgs),
}

/// Print the error and map it to exit code 2.
pub fn report(result: CommandResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}
