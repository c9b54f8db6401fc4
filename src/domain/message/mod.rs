//! Relay messages emitted by the metadata observer
//!
//! The observer publishes `VIDEO_INFO_UPDATED` when a new video is loaded
//! and `VIDEO_TIMESTAMP_UPDATED` as playback advances. A [`VideoSession`]
//! folds the stream so that the last observed state wins.

mod session;

pub use session::VideoSession;

use serde::{Deserialize, Serialize};

use crate::domain::error::MessageError;
use crate::domain::note::NoteMetadata;

/// Payload of a timestamp update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampUpdate {
    #[serde(rename = "timestamp")]
    pub timestamp_label: String,
}

/// A typed relay message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum VideoMessage {
    #[serde(rename = "VIDEO_INFO_UPDATED")]
    InfoUpdated(NoteMetadata),
    #[serde(rename = "VIDEO_TIMESTAMP_UPDATED")]
    TimestampUpdated(TimestampUpdate),
}

/// A message together with the UI target it is addressed to, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub target: Option<String>,
    pub message: VideoMessage,
}

const KNOWN_TYPES: &[&str] = &["VIDEO_INFO_UPDATED", "VIDEO_TIMESTAMP_UPDATED"];

impl MessageEnvelope {
    /// Decode one JSON message
    pub fn parse(line: &str) -> Result<Self, MessageError> {
        let mut value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| MessageError::Malformed(e.to_string()))?;

        let object = value
            .as_object_mut()
            .ok_or_else(|| MessageError::Malformed("expected a JSON object".to_string()))?;

        let kind = object
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| MessageError::Malformed("missing \"type\"".to_string()))?;

        if !KNOWN_TYPES.contains(&kind) {
            return Err(MessageError::UnknownType(kind.to_string()));
        }

        let target = match object.remove("target") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(_) => {
                return Err(MessageError::Malformed(
                    "\"target\" must be a string".to_string(),
                ))
            }
        };

        let message = serde_json::from_value(value)
            .map_err(|e| MessageError::Malformed(e.to_string()))?;

        Ok(Self { target, message })
    }
}
