//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::report::DiscoveryReport;
use crate::types::{LocalInterface, RangePolicy};
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write the report in human-readable plain text format.
pub fn write_plain<W: Write>(out: &mut W, report: &DiscoveryReport) -> io::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                 {} Discovery Results",
        style("smbscout").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Interface:").bold(), report.interface)?;
    writeln!(out, "  {} {}", style("Block:").bold(), report.block)?;
    writeln!(out, "  {} {}", style("Range:").bold(), report.range)?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} hosts probed in {:.2}s, {} reachable, {} printers",
        style("Statistics:").bold(),
        report.candidates,
        report.duration_ms as f64 / 1000.0,
        style(report.reachable.len()).yellow(),
        style(report.printers.len()).green().bold()
    )?;
    writeln!(out)?;

    if report.printers.is_empty() {
        writeln!(out, "  {}", style("No shared printers found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<15}  {:<28}  {}",
            style("HOST").bold(),
            style("SHARE").bold(),
            style("COMMENT").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for printer in &report.printers {
            let marker = if report.is_target(printer) {
                style("*").green().bold().to_string()
            } else {
                " ".to_string()
            };
            writeln!(
                out,
                "{} {:<15}  {:<28}  {}",
                marker,
                printer.host.to_string(),
                printer.share,
                style(printer.comment.as_deref().unwrap_or("")).dim()
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    if let Some(target) = &report.target {
        writeln!(out)?;
        writeln!(
            out,
            "  {} {}",
            style("Target:").bold(),
            style(target.unc_path()).green().bold()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a header before the sweep begins.
pub fn print_scan_header(interface: &LocalInterface, block: &str, range: RangePolicy, hosts: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("smbscout").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Interface: {}",
        style("•").dim(),
        style(interface).white().bold()
    );
    println!("{} Block: {} ({})", style("•").dim(), block, style(range).yellow());
    println!(
        "{} Probing {} hosts for SMB...",
        style("•").dim(),
        style(hosts).white().bold()
    );
    println!();
}

/// Print the enumerated interfaces, one per line.
pub fn print_interfaces(interfaces: &[LocalInterface], selected: Option<&LocalInterface>) {
    for (i, iface) in interfaces.iter().enumerate() {
        let mark = if Some(iface) == selected { "*" } else { " " };
        println!(
            "{} [{}] {:<20} {:<15} {}",
            style(mark).green().bold(),
            i,
            style(&iface.name).bold(),
            iface.address,
            style(iface.cidr()).dim()
        );
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
