//! Save note use case

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::error::InvalidTitleError;
use crate::domain::note::{render_template, NoteMetadata, NoteTitle};

use super::ports::{
    ConflictChoice, ConflictResolver, NoteStore, NoteStoreError, Notification, NotificationKind,
    Notifier,
};

/// Summary of the notification shown when a save fails
const FAILURE_SUMMARY: &str = "Note not saved";

/// Errors from the save note use case
#[derive(Debug, Error)]
pub enum SaveNoteError {
    #[error("Missing {0}")]
    MissingInput(&'static str),

    #[error(transparent)]
    InvalidTitle(#[from] InvalidTitleError),

    #[error("Could not check for an existing note: {0}")]
    Check(#[source] NoteStoreError),

    #[error("Failed to save note: {0}")]
    Save(#[source] NoteStoreError),

    #[error("Failed to append to note: {0}")]
    Append(#[source] NoteStoreError),
}

impl SaveNoteError {
    /// Whether the failure was the note service being unreachable
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Check(e) | Self::Save(e) | Self::Append(e) => e.is_connectivity(),
            _ => false,
        }
    }
}

/// Input parameters for the save note use case
#[derive(Debug, Clone, Default)]
pub struct SaveNoteInput {
    /// Title the note is stored under
    pub title: String,
    /// Free-text note body
    pub body: String,
    /// Video the note refers to
    pub metadata: Option<NoteMetadata>,
    /// Store the body as-is instead of rendering the video template
    pub raw: bool,
    /// Whether to show desktop notifications
    pub enable_notify: bool,
}

/// What happened to the stored note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Appended,
    Overwritten,
    Cancelled,
}

impl SaveOutcome {
    /// Short user-facing description
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Created => "Note saved",
            Self::Appended => "Note appended",
            Self::Overwritten => "Note overwritten",
            Self::Cancelled => "Save cancelled, existing note left untouched",
        }
    }
}

/// Output from the save note use case
#[derive(Debug, Clone)]
pub struct SaveNoteOutput {
    pub title: NoteTitle,
    pub outcome: SaveOutcome,
    /// The content that was written (or would have been, when cancelled)
    pub content: String,
}

/// Callbacks for status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct SaveNoteCallbacks {
    /// Called before the existence check
    pub on_checking: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the note already exists, before the resolver is asked
    pub on_conflict: Option<Box<dyn Fn(&NoteTitle) + Send + Sync>>,
    /// Called before the note is written
    pub on_writing: Option<Box<dyn Fn() + Send + Sync>>,
}

/// Create, append to, or overwrite a note depending on what is stored
pub struct SaveNoteUseCase<S, R, N>
where
    S: NoteStore,
    R: ConflictResolver,
    N: Notifier,
{
    store: S,
    resolver: R,
    notifier: N,
}

impl<S, R, N> SaveNoteUseCase<S, R, N>
where
    S: NoteStore,
    R: ConflictResolver,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(store: S, resolver: R, notifier: N) -> Self {
        Self {
            store,
            resolver,
            notifier,
        }
    }

    /// Build the note content for an input
    pub fn compose(input: &SaveNoteInput) -> String {
        match (&input.metadata, input.raw) {
            (Some(metadata), false) => render_template(metadata, &input.body),
            _ => input.body.clone(),
        }
    }

    /// Execute the save workflow
    pub async fn execute(
        &self,
        input: SaveNoteInput,
        callbacks: SaveNoteCallbacks,
    ) -> Result<SaveNoteOutput, SaveNoteError> {
        if input.title.trim().is_empty() {
            return Err(SaveNoteError::MissingInput("note title"));
        }
        if input.body.trim().is_empty() {
            return Err(SaveNoteError::MissingInput("note body"));
        }

        let title = NoteTitle::new(&input.title)?;
        let content = Self::compose(&input);

        let result = self.write(&title, &content, &callbacks).await;

        if input.enable_notify {
            self.notify_result(&title, &result).await;
        }

        let outcome = result?;
        info!(title = %title, ?outcome, "note saved");

        Ok(SaveNoteOutput {
            title,
            outcome,
            content,
        })
    }

    async fn write(
        &self,
        title: &NoteTitle,
        content: &str,
        callbacks: &SaveNoteCallbacks,
    ) -> Result<SaveOutcome, SaveNoteError> {
        if let Some(ref cb) = callbacks.on_checking {
            cb();
        }

        let exists = self
            .store
            .exists(title)
            .await
            .map_err(SaveNoteError::Check)?;

        if !exists {
            debug!(title = %title, "note does not exist, creating");
            if let Some(ref cb) = callbacks.on_writing {
                cb();
            }
            self.store
                .put(title, content)
                .await
                .map_err(SaveNoteError::Save)?;
            return Ok(SaveOutcome::Created);
        }

        if let Some(ref cb) = callbacks.on_conflict {
            cb(title);
        }

        let choice = self.resolver.resolve(title).await;
        debug!(title = %title, ?choice, "resolved existing note");

        match choice {
            ConflictChoice::Cancel => Ok(SaveOutcome::Cancelled),
            ConflictChoice::Append => {
                if let Some(ref cb) = callbacks.on_writing {
                    cb();
                }
                self.store
                    .append(title, content)
                    .await
                    .map_err(SaveNoteError::Append)?;
                Ok(SaveOutcome::Appended)
            }
            ConflictChoice::Overwrite => {
                if let Some(ref cb) = callbacks.on_writing {
                    cb();
                }
                self.store
                    .put(title, content)
                    .await
                    .map_err(SaveNoteError::Save)?;
                Ok(SaveOutcome::Overwritten)
            }
        }
    }

    async fn notify_result(&self, title: &NoteTitle, result: &Result<SaveOutcome, SaveNoteError>) {
        let notification = match result {
            Ok(SaveOutcome::Cancelled) => Notification::new(
                title.as_str(),
                SaveOutcome::Cancelled.describe(),
                NotificationKind::Cancelled,
            ),
            Ok(outcome) => {
                Notification::new(title.as_str(), outcome.describe(), NotificationKind::Saved)
            }
            Err(e) => Notification::new(FAILURE_SUMMARY, e.to_string(), NotificationKind::Failed),
        };

        if let Err(e) = self.notifier.notify(&notification).await {
            debug!(error = %e, "notification not shown");
        }
    }
}
