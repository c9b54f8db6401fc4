//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod conflict;
pub mod note_store;
pub mod notifier;

// Re-export common types
pub use config::ConfigStore;
pub use conflict::{ConflictChoice, ConflictResolver};
pub use note_store::{append_content, NoteStore, NoteStoreError, APPEND_SEPARATOR};
pub use notifier::{Notification, NotificationError, NotificationKind, Notifier};
