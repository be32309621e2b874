//! Host range policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How candidate hosts are derived from an address block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "policy")]
pub enum RangePolicy {
    /// Every host address in the block, minus network and broadcast.
    Full,
    /// Only hosts whose last octet lies in `start..=end`, next to the
    /// interface address and inside the block.
    Bounded { start: u8, end: u8 },
}

impl RangePolicy {
    /// First suffix of the default bounded range.
    pub const DEFAULT_START: u8 = 100;
    /// Last suffix of the default bounded range.
    pub const DEFAULT_END: u8 = 110;

    /// The default bounded range, `.100` through `.110`.
    pub const fn bounded_default() -> Self {
        Self::Bounded {
            start: Self::DEFAULT_START,
            end: Self::DEFAULT_END,
        }
    }
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self::bounded_default()
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full subnet"),
            Self::Bounded { start, end } => write!(f, "hosts .{}-.{}", start, end),
        }
    }
}

impl FromStr for RangePolicy {
    type Err = String;

    /// Parses `full`, `bounded` (default suffixes) or `START-END`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "full" | "subnet" => return Ok(Self::Full),
            "bounded" => return Ok(Self::bounded_default()),
            _ => {}
        }

        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("unknown range policy: {}", s))?;
        let start: u8 = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid host suffix: {}", start))?;
        let end: u8 = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid host suffix: {}", end))?;
        if start > end {
            return Err(format!("invalid host range: {} > {}", start, end));
        }
        Ok(Self::Bounded { start, end })
    }
}
