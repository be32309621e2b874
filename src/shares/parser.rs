//! Parsing of `net view \\host` output.
//!
//! The listing is a fixed-width table:
//!
//! ```text
//! Share name  Type   Used as  Comment
//! -------------------------------------------------------------------
//! HPPrinter   Print           Shared printer
//! Users       Disk
//! The command completed successfully.
//! ```
//!
//! The type column text depends on the remote OS locale, so the marker token
//! is configurable.

use crate::error::{ShareError, ShareResult};
use crate::types::SharedPrinter;
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Default token marking a print share in the type column.
pub const DEFAULT_MARKER: &str = "Print";

/// Default administrative share that is never reported.
pub const DEFAULT_ADMIN_SHARE: &str = "ipc$";

/// Line-oriented share listing parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareParser {
    marker: String,
    admin_share: String,
}

impl ShareParser {
    /// Create a parser for a marker token and administrative share name.
    pub fn new(marker: impl Into<String>, admin_share: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            admin_share: admin_share.into(),
        }
    }

    /// Extract printer shares for `host` from listing text.
    ///
    /// Once the dashed rule under the column header has been seen, the marker
    /// only counts at the header's type column. Without a header, the marker
    /// must follow a single leading column separated by two or more spaces.
    ///
    /// # Errors
    /// [`ShareError::NoSharesFound`] if no line qualifies.
    pub fn parse(&self, host: Ipv4Addr, output: &str) -> ShareResult<Vec<SharedPrinter>> {
        let mut seen = HashSet::new();
        let mut printers = Vec::new();
        let mut header: Option<&str> = None;
        let mut type_column: Option<usize> = None;

        for line in output.lines() {
            if is_rule(line) {
                type_column = header.and_then(type_column_of);
                continue;
            }

            let pos = match type_column {
                Some(column) => self.marker_at_column(line, column),
                None => self.marker_after_gap(line),
            };
            if !line.trim().is_empty() {
                header = Some(line);
            }
            let Some(pos) = pos else {
                continue;
            };

            let name = line[..pos].trim();
            if name.is_empty() || name.eq_ignore_ascii_case(&self.admin_share) {
                continue;
            }
            if !seen.insert(name.to_string()) {
                continue;
            }

            let comment = line[pos + self.marker.len()..].trim();
            printers.push(SharedPrinter::new(host, name).with_comment(Some(comment.to_string())));
        }

        if printers.is_empty() {
            return Err(ShareError::NoSharesFound);
        }
        Ok(printers)
    }

    /// Byte offset of the marker when it starts exactly at character `column`.
    fn marker_at_column(&self, line: &str, column: usize) -> Option<usize> {
        let (pos, _) = line.char_indices().nth(column)?;
        let before = line[..pos].chars().next_back();
        (before.is_some_and(char::is_whitespace) && self.is_marker_at(line, pos)).then_some(pos)
    }

    /// Byte offset of the first marker preceded by a two-space gap and a
    /// single name column.
    fn marker_after_gap(&self, line: &str) -> Option<usize> {
        if self.marker.is_empty() {
            return None;
        }
        line.match_indices(self.marker.as_str())
            .map(|(i, _)| i)
            .find(|&i| {
                let lead = &line[..i];
                let name = lead.trim();
                lead.chars().rev().take(2).filter(|c| c.is_whitespace()).count() == 2
                    && !name.is_empty()
                    && !has_column_gap(name)
                    && self.is_marker_at(line, i)
            })
    }

    fn is_marker_at(&self, line: &str, pos: usize) -> bool {
        if self.marker.is_empty() {
            return false;
        }
        let Some(rest) = line[pos..].strip_prefix(self.marker.as_str()) else {
            return false;
        };
        rest.chars().next().map_or(true, char::is_whitespace)
    }
}

/// A dashed line separating the header from the rows.
fn is_rule(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// Two or more consecutive whitespace characters.
fn has_column_gap(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).any(|w| w[0].is_whitespace() && w[1].is_whitespace())
}

/// Character offset of the second header column.
fn type_column_of(header: &str) -> Option<usize> {
    let chars: Vec<char> = header.chars().collect();
    (2..chars.len()).find(|&i| {
        !chars[i].is_whitespace()
            && chars[i - 1].is_whitespace()
            && chars[i - 2].is_whitespace()
            && chars[..i].iter().any(|c| !c.is_whitespace())
    })
}

impl Default for ShareParser {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, DEFAULT_ADMIN_SHARE)
    }
}
