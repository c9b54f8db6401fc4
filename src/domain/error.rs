//! Domain error types

use thiserror::Error;

/// Error when parsing a playback timestamp
#[derive(Debug, Clone, Error)]
#[error("Invalid timestamp: \"{input}\". Expected HH:MM:SS, MM:SS or a number of seconds (e.g., 01:02:03, 4:05, 90)")]
pub struct TimestampParseError {
    pub input: String,
}

/// Error when a video id cannot be extracted
#[derive(Debug, Clone, Error)]
#[error("Invalid video: \"{input}\". Expected a YouTube URL or a bare video id")]
pub struct VideoIdParseError {
    pub input: String,
}

/// Error when a note title is unusable
#[derive(Debug, Clone, Error)]
pub enum InvalidTitleError {
    #[error("Note title must not be empty")]
    Empty,

    #[error("Note title contains an empty path segment: \"{0}\"")]
    EmptySegment(String),

    #[error("Note title must not contain \".\" or \"..\" segments: \"{0}\"")]
    DotSegment(String),
}

/// Error when decoding a relay message
#[derive(Debug, Clone, Error)]
pub enum MessageError {
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Unknown message type: {0}")]
    UnknownType(String),
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Missing '{0}'. Set it via 'vidnote config set {0} <value>'")]
    Missing(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
