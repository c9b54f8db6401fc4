//! Video metadata captured alongside a note

use serde::{Deserialize, Serialize};

use crate::domain::video::{watch_url, Timestamp, VideoId};

/// Metadata of the video a note refers to.
///
/// Serialized with the field names used by the metadata observer
/// (`title`, `videoId`, `timestamp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub title: String,
    #[serde(rename = "videoId")]
    pub external_id: String,
    #[serde(rename = "timestamp")]
    pub timestamp_label: String,
}

impl NoteMetadata {
    /// Create metadata from validated parts
    pub fn new(title: impl Into<String>, video_id: &VideoId, timestamp: Timestamp) -> Self {
        Self {
            title: title.into(),
            external_id: video_id.as_str().to_string(),
            timestamp_label: timestamp.label(),
        }
    }

    /// Deep link back to the video at the captured timestamp
    pub fn deep_link(&self) -> String {
        watch_url(&self.external_id, &self.timestamp_label)
    }
}
