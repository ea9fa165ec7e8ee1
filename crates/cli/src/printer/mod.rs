use std::io::{self, Write};

use glint_engine::{FilterMetrics, Highlight, render_spans};
use serde_json::Value;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorChoice {
    /// Anything unrecognised falls back to `Auto`.
    pub fn parse(when: &str) -> Self {
        match when {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Configuration for printing filter results.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Output format (human or JSON).
    pub format: OutputFormat,
    /// Color handling strategy.
    pub color: ColorChoice,
    /// Maximum number of results to print.
    pub limit: usize,
    /// Whether to show timing statistics.
    pub show_timing: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            limit: 20,
            show_timing: true,
        }
    }
}

/// Human-readable printer; matched text is bold, or bracketed without color.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` color never applies here since arbitrary writers are not terminals.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;

        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    fn format_highlight(&self, highlight: &Highlight) -> String {
        let (open, close) = if self.use_color {
            (BOLD, RESET)
        } else {
            ("[", "]")
        };

        highlight
            .fields()
            .into_iter()
            .map(|(label, spans)| {
                let text = render_spans(spans, open, close);
                match label {
                    Some(key) => format!("{key}: {text}"),
                    None => text,
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct FilterPrintContext<'a> {
    /// The query as typed.
    pub query: &'a str,
    /// Number of matches before the limit.
    pub total: usize,
    /// Whether output was truncated due to limit.
    pub truncated: bool,
    /// Optional timing metrics.
    pub metrics: Option<&'a FilterMetrics>,
}

/// One matched item.
#[derive(Debug)]
pub struct ResultRow<'a> {
    /// 1-based rank of this result.
    pub rank: usize,
    pub item: &'a Value,
    pub highlight: &'a Highlight,
    pub is_same_order: bool,
}

/// Trait for printing filter results.
///
/// Implementations receive a stream of rows and context, and are responsible
/// for formatting and outputting them appropriately.
pub trait QueryPrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &FilterPrintContext) -> io::Result<()>;

    /// Called for each result row.
    fn print_row(&mut self, row: &ResultRow<'_>, ctx: &FilterPrintContext) -> io::Result<()>;

    /// Called once after all rows are printed.
    ///
    /// Use this for footers, summaries, and timing information.
    fn finish(&mut self, ctx: &FilterPrintContext) -> io::Result<()>;
}

fn millis(d: Option<std::time::Duration>) -> f64 {
    d.unwrap_or_default().as_secs_f64() * 1000.0
}

impl<W: Write, E: Write> QueryPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &FilterPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &ResultRow<'_>, _ctx: &FilterPrintContext) -> io::Result<()> {
        let marker = if row.is_same_order { ' ' } else { '~' };
        let text = self.format_highlight(row.highlight);
        writeln!(self.out, "{marker} {text}")
    }

    fn finish(&mut self, ctx: &FilterPrintContext) -> io::Result<()> {
        if ctx.truncated {
            let remaining = ctx.total.saturating_sub(self.cfg.limit);
            writeln!(self.out, "... and {} more results", remaining)?;
        }

        if self.cfg.show_timing
            && let Some(m) = ctx.metrics
        {
            writeln!(
                self.err,
                "\n[filter] {} of {} items matched in {:.2}ms (index: {:.2}ms, match: {:.2}ms, rank: {:.2}ms)",
                ctx.total,
                m.candidates,
                m.total().as_secs_f64() * 1000.0,
                millis(m.index_time),
                millis(m.match_time),
                millis(m.rank_time),
            )?;
        }

        Ok(())
    }
}

impl<W: Write, E: Write> QueryPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &FilterPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &ResultRow<'_>, _ctx: &FilterPrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "rank": row.rank,
            "item": row.item,
            "highlight": row.highlight,
            "is_same_order": row.is_same_order,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &FilterPrintContext) -> io::Result<()> {
        if self.cfg.show_timing
            && let Some(m) = ctx.metrics
        {
            let obj = serde_json::json!({
                "type": "summary",
                "query": ctx.query,
                "total": ctx.total,
                "candidates": m.candidates,
                "truncated": ctx.truncated,
                "timing_ms": {
                    "total": m.total().as_secs_f64() * 1000.0,
                    "tokenize": millis(m.tokenize_time),
                    "index": millis(m.index_time),
                    "match": millis(m.match_time),
                    "rank": millis(m.rank_time),
                }
            });
            writeln!(self.err, "{}", obj)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
