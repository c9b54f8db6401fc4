//! Obsidian note store module

mod client;

pub use client::{ObsidianClient, LEGACY_FOLDER};
