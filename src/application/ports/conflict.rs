//! Conflict resolution port interface

use async_trait::async_trait;

use crate::domain::note::NoteTitle;

/// Decision taken for an existing note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Append,
    Overwrite,
    Cancel,
}

/// Port deciding what to do when a note already exists
#[async_trait]
pub trait ConflictResolver: Send + Sync {
    /// Choose how to handle the existing note `title`
    async fn resolve(&self, title: &NoteTitle) -> ConflictChoice;
}

/// A fixed choice resolves every conflict the same way
#[async_trait]
impl ConflictResolver for ConflictChoice {
    async fn resolve(&self, _title: &NoteTitle) -> ConflictChoice {
        *self
    }
}

/// Blanket implementation for boxed resolver types
#[async_trait]
impl ConflictResolver for Box<dyn ConflictResolver> {
    async fn resolve(&self, title: &NoteTitle) -> ConflictChoice {
        self.as_ref().resolve(title).await
    }
}
