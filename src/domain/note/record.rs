//! Note record as returned by the note service

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Media type requesting the structured note representation
pub const NOTE_JSON_MEDIA_TYPE: &str = "application/vnd.olrapi.note+json";

/// File statistics of a stored note. Times are epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStat {
    #[serde(rename = "ctime")]
    pub created: u64,
    #[serde(rename = "mtime")]
    pub modified: u64,
    pub size: u64,
}

/// A stored note, fetched on demand and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub content: String,
    #[serde(default, deserialize_with = "frontmatter_as_strings")]
    pub frontmatter: BTreeMap<String, String>,
    pub path: String,
    #[serde(default)]
    pub stat: NoteStat,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Frontmatter values may be any YAML value; non-strings keep their JSON text.
fn frontmatter_as_strings<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
