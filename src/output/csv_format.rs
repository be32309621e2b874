//! CSV output formatting.

use crate::report::DiscoveryReport;
use std::io::Write;

/// Write one row per discovered printer.
pub fn write_csv<W: Write>(out: W, report: &DiscoveryReport) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["host", "share", "path", "comment", "target"])?;

    for printer in &report.printers {
        let host = printer.host.to_string();
        let path = printer.unc_path();
        wtr.write_record([
            host.as_str(),
            printer.share.as_str(),
            path.as_str(),
            printer.comment.as_deref().unwrap_or(""),
            if report.is_target(printer) { "yes" } else { "" },
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample;

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "host,share,path,comment,target");
        assert_eq!(lines[1], r"192.168.0.102,LaserJet,\\192.168.0.102\LaserJet,Floor 2,yes");
        assert_eq!(lines[2], r"192.168.0.107,Canon,\\192.168.0.107\Canon,,");
    }
}
