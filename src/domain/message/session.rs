//! Last-state-wins view of the metadata observer

use super::{MessageEnvelope, VideoMessage};
use crate::domain::note::NoteMetadata;

/// Current video state as seen by a note composer.
#[derive(Debug, Clone, Default)]
pub struct VideoSession {
    target: Option<String>,
    metadata: Option<NoteMetadata>,
    suggested_title: Option<String>,
}

impl VideoSession {
    /// Session accepting every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that ignores messages addressed to other targets
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Apply a message. Returns whether the state changed.
    pub fn apply(&mut self, envelope: &MessageEnvelope) -> bool {
        if let (Some(mine), Some(theirs)) = (&self.target, &envelope.target) {
            if mine != theirs {
                return false;
            }
        }

        match &envelope.message {
            VideoMessage::InfoUpdated(metadata) => {
                self.suggested_title = Some(metadata.title.clone());
                self.metadata = Some(metadata.clone());
                true
            }
            VideoMessage::TimestampUpdated(update) => match self.metadata.as_mut() {
                Some(metadata) => {
                    metadata.timestamp_label = update.timestamp_label.clone();
                    true
                }
                None => false,
            },
        }
    }

    /// Latest metadata, if a video has been observed
    pub fn metadata(&self) -> Option<&NoteMetadata> {
        self.metadata.as_ref()
    }

    /// Note title suggested by the latest video
    pub fn suggested_title(&self) -> Option<&str> {
        self.suggested_title.as_deref()
    }

    /// Consume the session, returning the latest metadata
    pub fn into_metadata(self) -> Option<NoteMetadata> {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::TimestampUpdate;

    fn info(title: &str, id: &str, ts: &str) -> MessageEnvelope {
        MessageEnvelope {
            target: None,
            message: VideoMessage::InfoUpdated(NoteMetadata {
                title: title.to_string(),
                external_id: id.to_string(),
                timestamp_label: ts.to_string(),
            }),
        }
    }

    fn tick(ts: &str) -> MessageEnvelope {
        MessageEnvelope {
            target: None,
            message: VideoMessage::TimestampUpdated(TimestampUpdate {
                timestamp_label: ts.to_string(),
            }),
        }
    }

    #[test]
    fn timestamp_before_info_is_ignored() {
        let mut session = VideoSession::new();
        assert!(!session.apply(&tick("00:00:05")));
        assert!(session.metadata().is_none());
    }

    #[test]
    fn timestamp_updates_current_video() {
        let mut session = VideoSession::new();
        session.apply(&info("Talk", "abc", "00:00:00"));
        assert!(session.apply(&tick("00:03:10")));

        let meta = session.metadata().unwrap();
        assert_eq!(meta.timestamp_label, "00:03:10");
        assert_eq!(meta.external_id, "abc");
    }

    #[test]
    fn new_video_replaces_state_and_title() {
        let mut session = VideoSession::new();
        session.apply(&info("First", "aaa", "00:00:00"));
        session.apply(&tick("00:01:00"));
        session.apply(&info("Second", "bbb", "00:00:00"));

        assert_eq!(session.suggested_title(), Some("Second"));
        let meta = session.into_metadata().unwrap();
        assert_eq!(meta.external_id, "bbb");
        assert_eq!(meta.timestamp_label, "00:00:00");
    }

    #[test]
    fn messages_for_other_targets_are_ignored() {
        let mut session = VideoSession::for_target("side-panel");
        let mut other = info("Elsewhere", "zzz", "00:00:00");
        other.target = Some("popup".to_string());

        assert!(!session.apply(&other));
        assert!(session.metadata().is_none());

        let mut mine = info("Here", "yyy", "00:00:00");
        mine.target = Some("side-panel".to_string());
        assert!(session.apply(&mine));
        assert!(session.apply(&info("Broadcast", "xxx", "00:00:00")));
    }
}
