//! In-memory store of watched segments.
//!
//! The store holds an immutable [`SegmentState`] snapshot behind a lock. Every
//! mutation builds a new snapshot and swaps it in, so a reader holding an
//! `Arc<SegmentState>` never observes a half-applied change. Subscribers get
//! one snapshot per mutation over a broadcast channel.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use watchtrail_common::{Result, WatchSegment};

const EVENT_CAPACITY: usize = 64;

/// Snapshot of the watched segments and the open interval cursor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentState {
    pub segments: Vec<WatchSegment>,
    /// Start time of the interval currently being watched.
    pub current_segment_start: f64,
    /// Incremented on every mutation.
    pub revision: u64,
    /// Incremented whenever the collection is replaced instead of appended to.
    pub generation: u64,
    /// Number of leading segments that were loaded from history and are
    /// already persisted.
    pub persisted_len: usize,
}

impl SegmentState {
    /// Sum of segment lengths, counting overlaps more than once.
    pub fn raw_watched_seconds(&self) -> f64 {
        self.segments.iter().map(WatchSegment::duration).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

pub struct SegmentStore {
    state: RwLock<Arc<SegmentState>>,
    event_tx: broadcast::Sender<Arc<SegmentState>>,
}

impl SegmentStore {
    pub fn new() -> Arc<Self> {
        Self::with_segments(Vec::new())
    }

    /// Create a store pre-populated with previously watched segments. They
    /// count as already persisted.
    pub fn with_segments(segments: Vec<WatchSegment>) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        Arc::new(Self {
            state: RwLock::new(Arc::new(SegmentState {
                persisted_len: segments.len(),
                segments,
                current_segment_start: 0.0,
                revision: 0,
                generation: 0,
            })),
            event_tx,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SegmentState>> {
        self.event_tx.subscribe()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> Arc<SegmentState> {
        self.state.read().clone()
    }

    pub fn segments(&self) -> Vec<WatchSegment> {
        self.state.read().segments.clone()
    }

    pub fn current_start(&self) -> f64 {
        self.state.read().current_segment_start
    }

    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    pub fn len(&self) -> usize {
        self.state.read().segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().segments.is_empty()
    }

    /// Append a watched interval.
    ///
    /// The interval is validated first; an invalid one leaves the state
    /// untouched. Overlapping intervals are kept as-is, not merged.
    pub fn add_segment(&self, start: f64, end: f64) -> Result<WatchSegment> {
        let segment = WatchSegment::new(start, end)?;

        self.update(|state| {
            let mut segments = Vec::with_capacity(state.segments.len() + 1);
            segments.extend_from_slice(&state.segments);
            segments.push(segment);
            SegmentState {
                segments,
                current_segment_start: state.current_segment_start,
                revision: state.revision,
                generation: state.generation,
                persisted_len: state.persisted_len,
            }
        });

        tracing::debug!("Added watch segment [{:.2}, {:.2}]", start, end);
        Ok(segment)
    }

    /// Drop every recorded segment. The open interval cursor is kept.
    pub fn clear_segments(&self) {
        self.update(|state| SegmentState {
            segments: Vec::new(),
            current_segment_start: state.current_segment_start,
            revision: state.revision,
            generation: state.generation + 1,
            persisted_len: 0,
        });
        tracing::debug!("Cleared watch segments");
    }

    /// Move the open interval cursor. The segment collection is not touched.
    pub fn set_current_start(&self, time: f64) {
        self.update(|state| SegmentState {
            segments: state.segments.clone(),
            current_segment_start: time,
            revision: state.revision,
            generation: state.generation,
            persisted_len: state.persisted_len,
        });
    }

    /// Replace the collection with segments loaded from history.
    ///
    /// Invalid segments are skipped with a warning rather than failing the
    /// whole load. Seeded segments are marked as persisted, so an autosave
    /// does not write them back.
    pub fn seed(&self, segments: Vec<WatchSegment>) -> usize {
        let total = segments.len();
        let valid: Vec<WatchSegment> = segments
            .into_iter()
            .filter(|segment| {
                let ok = segment.is_valid();
                if !ok {
                    tracing::warn!(
                        "Skipping invalid history segment [{}, {}]",
                        segment.start,
                        segment.end
                    );
                }
                ok
            })
            .collect();
        let kept = valid.len();

        self.update(|state| SegmentState {
            segments: valid,
            current_segment_start: state.current_segment_start,
            revision: state.revision,
            generation: state.generation + 1,
            persisted_len: kept,
        });

        tracing::info!("Seeded {} of {} history segments", kept, total);
        kept
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&SegmentState) -> SegmentState,
    {
        let next = {
            let mut guard = self.state.write();
            let mut next = f(&guard);
            next.revision = guard.revision + 1;
            let next = Arc::new(next);
            *guard = next.clone();
            next
        };

        if self.event_tx.send(next).is_err() {
            tracing::trace!("No subscribers for segment state");
        }
    }
}
