//! Playback timestamp value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TimestampParseError;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Value object representing a playback position in whole seconds.
///
/// Displays as zero-padded `HH:MM:SS`. Hours wrap at 24, matching an
/// ISO time-of-day rendering of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    seconds: u64,
}

impl Timestamp {
    /// Create a Timestamp from whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Get the position in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Format as the `HH:MM:SS` label used in notes and deep links
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    /// Parse `HH:MM:SS`, `MM:SS` or plain seconds.
    /// A fractional part on the last component is truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimestampParseError {
            input: s.to_string(),
        };

        let input = s.trim();
        if input.is_empty() {
            return Err(err());
        }

        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() > 3 {
            return Err(err());
        }

        let (last, leading) = parts.split_last().ok_or_else(err)?;

        let whole = match last.split_once('.') {
            Some((whole, frac)) if frac.chars().all(|c| c.is_ascii_digit()) => whole,
            Some(_) => return Err(err()),
            None => last,
        };
        let last_value = parse_component(whole).ok_or_else(err)?;

        let mut total: u64 = 0;
        for part in leading {
            total = total * 60 + parse_component(part).ok_or_else(err)?;
        }

        // Trailing components of a clock label stay below 60
        if !leading.is_empty() && last_value >= 60 {
            return Err(err());
        }
        if leading.len() == 2 && parse_component(leading[1]).unwrap_or(0) >= 60 {
            return Err(err());
        }

        Ok(Self {
            seconds: total * 60 + last_value,
        })
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapped = self.seconds % SECS_PER_DAY;
        let hours = wrapped / 3600;
        let minutes = (wrapped % 3600) / 60;
        let seconds = wrapped % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
