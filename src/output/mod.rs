//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of discovery
//! reports, plus the one-line status helpers used while a run progresses.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_info, print_interfaces, print_scan_header, print_success, print_warning,
    write_plain,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::report::DiscoveryReport;
use std::io;

/// Format and print a report to stdout according to `format`.
pub fn print_report(report: &DiscoveryReport, format: OutputFormat) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Plain => write_plain(&mut out, report)?,
        OutputFormat::Json => write_json(&mut out, report)?,
        OutputFormat::Csv => write_csv(&mut out, report)?,
    }
    Ok(())
}
