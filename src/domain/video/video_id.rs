//! Video id value object

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::domain::error::VideoIdParseError;

/// Base of the deep link written into notes
pub const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Path prefixes that carry the id as the next segment
const ID_PATH_PREFIXES: &[&str] = &["shorts", "live", "embed"];

/// Value object for a YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_candidate(candidate: &str, input: &str) -> Result<Self, VideoIdParseError> {
        if is_bare_id(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(VideoIdParseError {
                input: input.to_string(),
            })
        }
    }

    fn from_url(url: &Url, input: &str) -> Result<Self, VideoIdParseError> {
        let err = || VideoIdParseError {
            input: input.to_string(),
        };

        let host = url.host_str().ok_or_else(err)?.to_lowercase();
        let mut segments = url.path_segments().ok_or_else(err)?.filter(|s| !s.is_empty());

        if host == "youtu.be" {
            let id = segments.next().ok_or_else(err)?;
            return Self::from_candidate(id, input);
        }

        if host != "youtube.com" && !host.ends_with(".youtube.com") {
            return Err(err());
        }

        match segments.next() {
            Some("watch") => {
                let id = url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
                    .ok_or_else(err)?;
                Self::from_candidate(&id, input)
            }
            Some(prefix) if ID_PATH_PREFIXES.contains(&prefix) => {
                let id = segments.next().ok_or_else(err)?;
                Self::from_candidate(id, input)
            }
            _ => Err(err()),
        }
    }
}

/// Build the deep link `https://www.youtube.com/watch?v=<id>&t=<label>`
pub fn watch_url(external_id: &str, timestamp_label: &str) -> String {
    format!("{}?v={}&t={}", WATCH_URL, external_id, timestamp_label)
}

fn is_bare_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for VideoId {
    type Err = VideoIdParseError;

    /// Accepts watch URLs, `youtu.be` short links, `/shorts/`, `/live/`
    /// and `/embed/` paths, or a bare id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::from_url(&url, s),
            _ => Self::from_candidate(input, s),
        }
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
