//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// How a save ended, as far as the desktop notification is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Saved,
    Cancelled,
    Failed,
}

impl NotificationKind {
    /// Freedesktop icon shown next to the message
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Saved => "document-save",
            Self::Cancelled => "dialog-warning",
            Self::Failed => "dialog-error",
        }
    }
}

/// A desktop notification about a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: String,
    pub body: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(summary: impl Into<String>, body: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            summary: summary.into(),
            body: body.into(),
            kind,
        }
    }
}

/// Port for desktop notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a notification. Callers treat failures as non-fatal.
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.as_ref().notify(notification).await
    }
}
