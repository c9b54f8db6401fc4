//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the Obsidian Local REST API, the config file
//! and desktop notifications.

pub mod config;
pub mod notification;
pub mod obsidian;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use obsidian::ObsidianClient;
