//! Desktop notification adapter using notify-rust

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{Notification, NotificationError, Notifier};

/// Application name reported to the notification daemon
pub const APP_NAME: &str = "vidnote";

/// Shows save results as desktop notifications
#[derive(Debug, Clone, Default)]
pub struct NotifyRustNotifier;

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let notification = notification.clone();
        debug!(summary = %notification.summary, kind = ?notification.kind, "showing notification");

        // show() blocks on the platform backend
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&notification.summary)
                .body(&notification.body)
                .icon(notification.kind.icon_name())
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("notification task failed: {}", e)))?
    }
}

/// Notifier used when notifications are turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, _notification: &Notification) -> Result<(), NotificationError> {
        Ok(())
    }
}
