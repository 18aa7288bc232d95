//! Core watch-history types.
//!
//! Field names match the documents already stored remotely
//! (`{"segments": [{"start": .., "end": ..}]}`), so serialization must not
//! rename them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::DocumentId;

/// A closed interval `[start, end]`, in seconds, that the user has watched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchSegment {
    pub start: f64,
    pub end: f64,
}

impl WatchSegment {
    /// Create a validated segment.
    ///
    /// Both bounds must be finite, `start` must be non-negative and strictly
    /// less than `end`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        let segment = Self { start, end };
        segment.validate()?;
        Ok(segment)
    }

    /// Check the interval invariant on a segment built elsewhere (e.g. decoded
    /// from storage).
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(Error::invalid_segment(self.start, self.end));
        }
        if self.start < 0.0 || self.start >= self.end {
            return Err(Error::invalid_segment(self.start, self.end));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Length of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Seconds of this segment that fall inside `[lo, hi)`.
    pub fn overlap(&self, lo: f64, hi: f64) -> f64 {
        (self.end.min(hi) - self.start.max(lo)).max(0.0)
    }
}

/// A batch of watch segments persisted as one remote document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchDocument {
    /// Store-assigned identifier; absent on documents not yet written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,

    #[serde(default)]
    pub segments: Vec<WatchSegment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl WatchDocument {
    /// Build an unsaved document stamped with the current time.
    pub fn new(segments: Vec<WatchSegment>) -> Self {
        Self {
            id: None,
            segments,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }
}
