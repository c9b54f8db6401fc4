//! Policy applied when a note with the same title already exists

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// How to resolve a title collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Ask the user each time
    #[default]
    Ask,
    /// Append the new content after a blank line
    Append,
    /// Replace the stored content
    Overwrite,
    /// Leave the stored note untouched
    Cancel,
}

impl ConflictPolicy {
    /// All policies in display order
    pub const ALL: [ConflictPolicy; 4] = [Self::Ask, Self::Append, Self::Overwrite, Self::Cancel];

    /// Config/CLI identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Append => "append",
            Self::Overwrite => "overwrite",
            Self::Cancel => "cancel",
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::ValidationError {
                key: "on_conflict".to_string(),
                message: format!(
                    "Invalid value '{}'. Valid options: ask, append, overwrite, cancel",
                    s
                ),
            })
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
