//! Markdown template for video notes

use super::metadata::NoteMetadata;

/// Render a note document for a video.
///
/// The output embeds a deep link back to the video at the captured
/// timestamp, followed by the note body verbatim.
pub fn render_template(metadata: &NoteMetadata, note: &str) -> String {
    format!(
        "# {title}\n\n## Timestamp: {timestamp}\n[YouTube link]({link})\n\n## Note\n{note}\n",
        title = metadata.title,
        timestamp = metadata.timestamp_label,
        link = metadata.deep_link(),
        note = note,
    )
}
