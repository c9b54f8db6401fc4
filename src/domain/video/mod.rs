//! Video domain module

mod timestamp;
mod video_id;

pub use timestamp::Timestamp;
pub use video_id::{watch_url, VideoId, WATCH_URL};
