//! Watchtrail - watch-history tracking for video players
//!
//! Records which ranges of a video have been watched, derives a watched-density
//! heatmap for the seek bar, and syncs history with a remote document store.

pub mod config;
pub mod format;
pub mod heatmap;
pub mod history;
pub mod player;
pub mod segments;

pub use watchtrail_common::{DocumentId, Error, Result, WatchDocument, WatchSegment};
