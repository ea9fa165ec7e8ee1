use std::io::{Stderr, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use glint_engine::FuzzyFilter;
use log::debug;
use serde_json::Value;

use crate::commands::{CommandResult, report};
use crate::input::{FieldSelector, parse_items, read_input};
use crate::printer::{
    ColorChoice, FilterPrintContext, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig,
    QueryPrinter, ResultRow,
};
use crate::settings::{ConfigFlags, load_config};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress timing statistics
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    /// Create a printer based on the output options.
    pub fn make_printer(&self, limit: usize) -> Box<dyn QueryPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let cfg = PrinterConfig {
            format,
            color: ColorChoice::parse(&self.color),
            limit,
            show_timing: !self.quiet,
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Words that must each prefix a word of the item
    pub query: String,

    /// JSON array or NDJSON file of items; stdin when omitted or `-`
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Item field to search; repeat to search several (`/a/b` for nested)
    #[arg(long = "field", short = 'f', value_name = "NAME")]
    pub fields: Vec<String>,

    /// Config file; defaults to the user config when present
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub flags: ConfigFlags,

    /// Maximum number of results to display
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: FilterArgs) -> ExitCode {
    report(execute(args).map(exit_code))
}

/// Exit 0 when something matched, 1 when nothing did.
fn exit_code(total: usize) -> ExitCode {
    if total == 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Returns the number of matches.
fn execute(args: FilterArgs) -> CommandResult<usize> {
    let mut config = load_config(args.config.as_deref())?;
    args.flags.apply(&mut config);

    let text = read_input(args.input.as_deref())?;
    let items = parse_items(&text)?;

    let mut filter = FuzzyFilter::builder()
        .items(items)
        .text_provider(FieldSelector::new(args.fields.clone()))
        .config(config)
        .build()?;

    let mut printer = args.output.make_printer(args.limit);
    print_matches(&mut filter, &args, printer.as_mut())
}

/// Run the query and print up to `limit` rows. Returns the number of matches.
fn print_matches(
    filter: &mut FuzzyFilter<Value>,
    args: &FilterArgs,
    printer: &mut dyn QueryPrinter,
) -> CommandResult<usize> {
    let (results, metrics) = filter.filter_timed(&args.query);
    let total = results.len();
    debug!(
        "query {:?} matched {} items in {:.2}ms",
        args.query,
        total,
        metrics.total().as_secs_f64() * 1000.0
    );

    let ctx = FilterPrintContext {
        query: &args.query,
        total,
        truncated: total > args.limit,
        metrics: Some(&metrics),
    };

    printer.begin(&ctx)?;

    for (i, result) in results.iter().take(args.limit).enumerate() {
        let row = ResultRow {
            rank: i + 1,
            item: result.item,
            highlight: &result.highlight,
            is_same_order: result.is_same_order,
        };
        printer.print_row(&row, &ctx)?;
    }

    printer.finish(&ctx)?;

    Ok(total)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
