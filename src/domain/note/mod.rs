//! Note domain module

mod metadata;
mod record;
mod template;
mod title;

pub use metadata::NoteMetadata;
pub use record::{NoteRecord, NoteStat, NOTE_JSON_MEDIA_TYPE};
pub use template::render_template;
pub use title::{NoteTitle, NOTE_EXTENSION};
