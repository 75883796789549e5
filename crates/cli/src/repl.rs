//! Line-oriented interactive session.
//!
//! Parameter commands re-run detection on the cached series; only
//! `regenerate` draws a new one.

use std::io::{BufRead, Write};

use anomaly::{DataType, DetectionMethod, DetectionSession};
use tracing::debug;

use crate::render::render_report;
use crate::CliResult;

const HELP: &str = "\
Commands:
  method <iqr|std-dev|percentile>   switch detection method
  k <multiplier>                    set the multiplier of the active method
  pct <lower> <upper>               set percentile bounds
  type <affiliations|revenue|growth-rate|efficiency>
                                    data type for the next generated series
  days <7-90>                       day count for the next generated series
  regenerate                        draw a new series
  show                              re-run detection and print the report
  help                              show this message
  quit                              leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Method(DetectionMethod),
    Multiplier(f64),
    Percentiles(f64, f64),
    DataType(DataType),
    Days(usize),
    Regenerate,
    Show,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> CliResult<Option<ReplCommand>> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("method", [m]) => ReplCommand::Method(m.parse().map_err(|e| format!("{}", e))?),
        ("k", [k]) => ReplCommand::Multiplier(parse_number(k)?),
        ("pct", [lo, hi]) => ReplCommand::Percentiles(parse_number(lo)?, parse_number(hi)?),
        ("type", [t]) => ReplCommand::DataType(t.parse().map_err(|e| format!("{}", e))?),
        ("days", [d]) => ReplCommand::Days(
            d.parse()
                .map_err(|_| format!("Invalid day count: {}", d))?,
        ),
        ("regenerate", []) => ReplCommand::Regenerate,
        ("show", []) => ReplCommand::Show,
        ("help", []) => ReplCommand::Help,
        ("quit", []) | ("exit", []) => ReplCommand::Quit,
        (other, _) => {
            return Err(format!(
                "Unknown or malformed command: '{}'. Type 'help' for usage",
                other
            ))
        }
    };
    Ok(Some(command))
}

fn parse_number(raw: &str) -> CliResult<f64> {
    raw.parse::<f64>()
        .map_err(|_| format!("Invalid number: {}", raw))
}

/// Drive `session` from `input` until `quit` or end of input.
///
/// Command errors are reported and the loop continues, so an invalid value
/// can be re-entered.
pub fn run_repl<I, W>(session: &mut DetectionSession, input: I, output: &mut W) -> CliResult<()>
where
    I: BufRead,
    W: Write,
{
    let io_err = |e: std::io::Error| format!("Failed to write output: {}", e);

    writeln!(output, "{}", HELP).map_err(io_err)?;
    show(session, output)?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "Error: {}", e).map_err(io_err)?;
                continue;
            }
        };
        debug!(?command, "session command");

        let applied = match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => {
                writeln!(output, "{}", HELP).map_err(io_err)?;
                continue;
            }
            ReplCommand::Show => Ok(()),
            ReplCommand::Regenerate => session.regenerate().map(|_| ()),
            ReplCommand::Method(method) => session.set_method(method),
            ReplCommand::Multiplier(k) => match session.config().methods.active {
                DetectionMethod::Iqr => session.set_iqr_multiplier(k),
                DetectionMethod::StdDev => session.set_std_dev_multiplier(k),
                DetectionMethod::Percentile => {
                    writeln!(
                        output,
                        "Error: the percentile method has no multiplier; use 'pct <lower> <upper>'"
                    )
                    .map_err(io_err)?;
                    continue;
                }
            },
            ReplCommand::Percentiles(lo, hi) => session.set_percentiles(lo, hi),
            ReplCommand::DataType(data_type) => {
                session.set_data_type(data_type);
                writeln!(output, "Data type applies after 'regenerate'").map_err(io_err)?;
                Ok(())
            }
            ReplCommand::Days(days) => {
                let applied = session.set_num_days(days);
                if applied.is_ok() {
                    writeln!(output, "Day count applies after 'regenerate'").map_err(io_err)?;
                }
                applied
            }
        };

        match applied {
            Ok(()) => show(session, output)?,
            Err(e) => writeln!(output, "Error: {}", e).map_err(io_err)?,
        }
    }
    Ok(())
}

fn show<W: Write>(session: &mut DetectionSession, output: &mut W) -> CliResult<()> {
    let result = session.run().map_err(|e| e.to_string())?;
    let series = session
        .cached_series()
        .ok_or_else(|| "No series available".to_string())?;
    let report =
        render_report(series, &result).map_err(|e| format!("Failed to render report: {}", e))?;
    writeln!(output, "\n{}", report).map_err(|e| format!("Failed to write output: {}", e))
}
