//! Note title value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidTitleError;

/// Extension of every note file in the vault
pub const NOTE_EXTENSION: &str = ".md";

/// Value object for a note title.
///
/// A `/` inside the title separates folders, so `Talks/Rust` addresses
/// `Talks/Rust.md` in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteTitle(String);

impl NoteTitle {
    /// Validate and create a title
    pub fn new(title: impl AsRef<str>) -> Result<Self, InvalidTitleError> {
        let trimmed = title.as_ref().trim();
        let trimmed = trimmed.strip_suffix(NOTE_EXTENSION).unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(InvalidTitleError::Empty);
        }

        if trimmed.split('/').any(|segment| segment.trim().is_empty()) {
            return Err(InvalidTitleError::EmptySegment(trimmed.to_string()));
        }

        // URL normalisation would silently resolve these to another note
        if trimmed
            .split('/')
            .any(|segment| matches!(segment.trim(), "." | ".."))
        {
            return Err(InvalidTitleError::DotSegment(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the title as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the note file inside the vault, optionally below
    /// `folder`. The last segment carries the `.md` extension.
    pub fn path_segments(&self, folder: Option<&str>) -> Vec<String> {
        let mut segments: Vec<String> = folder
            .map(folder_segments)
            .unwrap_or_default();

        segments.extend(self.0.split('/').map(str::to_string));

        if let Some(last) = segments.last_mut() {
            last.push_str(NOTE_EXTENSION);
        }

        segments
    }

    /// Vault-relative path, e.g. `YouTube Notes/Talk.md`
    pub fn vault_path(&self, folder: Option<&str>) -> String {
        self.path_segments(folder).join("/")
    }
}

/// Split a folder setting into non-empty segments
fn folder_segments(folder: &str) -> Vec<String> {
    folder
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl FromStr for NoteTitle {
    type Err = InvalidTitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for NoteTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
