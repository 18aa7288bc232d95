//! Periodic persistence of the segment store.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use watchtrail_common::{DocumentId, Result};

use super::HistoryClient;
use crate::segments::{SegmentState, SegmentStore};

/// How far into the current collection the history store is up to date.
#[derive(Debug, Clone, Copy)]
struct Watermark {
    generation: u64,
    saved_len: usize,
}

impl Watermark {
    fn of(state: &SegmentState) -> Self {
        Self {
            generation: state.generation,
            saved_len: state.persisted_len,
        }
    }

    /// Index of the first segment in `state` not yet written.
    fn pending_from(&self, state: &SegmentState) -> usize {
        let from = if state.generation == self.generation {
            self.saved_len.max(state.persisted_len)
        } else {
            state.persisted_len
        };
        from.min(state.segments.len())
    }
}

/// Writes segments appended since the last successful save as one new
/// history document.
///
/// Segments seeded from history are never written back. Saves are
/// serialized, so two overlapping calls never write the same segments twice.
#[derive(Clone)]
pub struct Autosave {
    store: Arc<SegmentStore>,
    client: HistoryClient,
    watermark: Arc<Mutex<Watermark>>,
    save_lock: Arc<tokio::sync::Mutex<()>>,
}

impl Autosave {
    pub fn new(store: Arc<SegmentStore>, client: HistoryClient) -> Self {
        let watermark = Watermark::of(&store.snapshot());
        Self {
            store,
            client,
            watermark: Arc::new(Mutex::new(watermark)),
            save_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Whether the store has unsaved segments.
    pub fn is_dirty(&self) -> bool {
        let snapshot = self.store.snapshot();
        let from = self.watermark.lock().pending_from(&snapshot);
        from < snapshot.segments.len()
    }

    /// Save immediately if there is anything new. Returns the new document id,
    /// or `None` when nothing needed saving.
    pub async fn save_now(&self) -> Result<Option<DocumentId>> {
        let _guard = self.save_lock.lock().await;

        let snapshot = self.store.snapshot();
        let from = self.watermark.lock().pending_from(&snapshot);
        let pending = &snapshot.segments[from..];
        if pending.is_empty() {
            return Ok(None);
        }

        let id = self.client.save_segments(pending).await?;
        *self.watermark.lock() = Watermark {
            generation: snapshot.generation,
            saved_len: snapshot.segments.len(),
        };
        tracing::debug!("Autosaved {} new segments", pending.len());
        Ok(Some(id))
    }
}

/// Timer loop driving [`Autosave`] every save interval until shut down.
pub struct AutosaveWorker {
    autosave: Autosave,
    interval: Duration,
    shutdown_rx: mpsc::Receiver<()>,
}

impl AutosaveWorker {
    pub fn new(autosave: Autosave, interval: Duration, shutdown_rx: mpsc::Receiver<()>) -> Self {
        Self {
            autosave,
            interval,
            shutdown_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Autosave started (every {:?})", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.recv() => {
                    tracing::info!("Autosave shutting down");
                    break;
                }
                _ = ticker.tick() => {}
            }

            if let Err(e) = self.autosave.save_now().await {
                tracing::warn!("Autosave failed: {}", e);
            }
        }

        if let Err(e) = self.autosave.save_now().await {
            tracing::error!("Final autosave failed: {}", e);
        }
    }
}
