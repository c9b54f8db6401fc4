//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod message;
pub mod note;
pub mod video;

// Re-export common types
pub use config::{AppConfig, ClientConfig, ConflictPolicy};
pub use error::*;
pub use message::{MessageEnvelope, VideoMessage, VideoSession};
pub use note::{render_template, NoteMetadata, NoteRecord, NoteStat, NoteTitle};
pub use video::{Timestamp, VideoId};
