//! vidnote - timestamped video notes for Obsidian
//!
//! This crate captures notes about a video at a playback position and
//! stores them in an Obsidian vault through the Local REST API plugin.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (timestamps, video ids, note titles), relay messages, config, and errors
//! - **Application**: The save workflow and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Local REST API client, config file, notifications)
//! - **CLI**: Command-line interface, argument parsing, and logging setup

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
