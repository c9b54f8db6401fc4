//! Note store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::note::{NoteRecord, NoteTitle};

/// Separator placed between stored content and appended content
pub const APPEND_SEPARATOR: &str = "\n\n";

/// Note store errors
#[derive(Debug, Clone, Error)]
pub enum NoteStoreError {
    #[error("Could not reach the note service: {0}")]
    Unreachable(String),

    #[error("The note service rejected the API key")]
    Unauthorized,

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Note service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from the note service: {0}")]
    InvalidResponse(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl NoteStoreError {
    /// Whether the service could not be contacted at all
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Join stored content with an addition
pub fn append_content(existing: &str, addition: &str) -> String {
    format!("{}{}{}", existing, APPEND_SEPARATOR, addition)
}

/// Port for the remote note store
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Check whether a note exists.
    ///
    /// # Returns
    /// `Ok(false)` only when the service reports the note as missing
    async fn exists(&self, title: &NoteTitle) -> Result<bool, NoteStoreError>;

    /// Fetch a note with its metadata
    async fn fetch(&self, title: &NoteTitle) -> Result<NoteRecord, NoteStoreError>;

    /// Create the note or replace its content
    async fn put(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError>;

    /// Append content to an existing note after a blank line
    async fn append(&self, title: &NoteTitle, content: &str) -> Result<(), NoteStoreError>;
}
