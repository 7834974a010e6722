//! Clock time validation.
//!
//! Times arrive as `HH:MM` tokens and are kept as their four digits with the
//! colon removed. Zero padding makes string order match chronological order,
//! so `TimeOfDay` derives `Ord` straight from the string.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Result, ScheduleError};

/// The pattern admits hours up to 29; [`UPPER_BOUND`] rejects the rest.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-2][0-9]:[0-5][0-9]$").expect("time pattern is a valid regex")
});

/// Every valid normalized time sorts strictly below this.
const UPPER_BOUND: &str = "2400";

/// A validated time of day in 24-hour `HHMM` form, `0000` through `2359`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(String);

impl TimeOfDay {
    /// The normalized digits, e.g. `"1530"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render back to `HH:MM`.
    pub fn as_clock(&self) -> String {
        format!("{}:{}", &self.0[..2], &self.0[2..])
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a raw `HH:MM` token and strip the separator.
///
/// Format is checked first (`InvalidFormat`), then the range
/// (`OutOfRange`), so `"29:00"` is well formed but out of range.
pub fn normalize(raw: &str) -> Result<TimeOfDay> {
    if !TIME_PATTERN.is_match(raw) {
        return Err(ScheduleError::InvalidFormat {
            value: raw.to_string(),
        });
    }

    let digits = raw.replace(':', "");
    if digits.as_str() >= UPPER_BOUND {
        return Err(ScheduleError::OutOfRange { value: digits });
    }

    Ok(TimeOfDay(digits))
}
