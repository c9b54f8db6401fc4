//! Application layer - Use cases and port interfaces
//!
//! Contains the note save workflow and trait definitions
//! for external system interactions.

pub mod ports;
pub mod save_note;

// Re-export use cases
pub use save_note::{
    SaveNoteCallbacks, SaveNoteError, SaveNoteInput, SaveNoteOutput, SaveNoteUseCase, SaveOutcome,
};
