//! End-to-end watch tracking: player events, store, heatmap and history sync.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use watchtrail::config::Config;
use watchtrail::heatmap::{build_heatmap, HeatmapChart};
use watchtrail::history::{Autosave, AutosaveWorker, HistoryClient, MemoryDocumentStore};
use watchtrail::player::{PlaybackTracker, PlayerProps};
use watchtrail::segments::SegmentStore;
use watchtrail::WatchSegment;

fn seg(start: f64, end: f64) -> WatchSegment {
    WatchSegment { start, end }
}

#[test]
fn store_mutations_drive_heatmap() {
    let store = SegmentStore::new();
    store.set_current_start(0.0);
    store.add_segment(0.0, 30.0).unwrap();
    store.add_segment(45.0, 60.0).unwrap();

    let series = build_heatmap(&store.segments(), 60.0, 2).unwrap();
    assert_eq!(series.values, vec![1.0, 0.5]);
    assert_eq!(series.labels, vec![0.0, 30.0]);
}

#[tokio::test]
async fn session_is_saved_and_seeds_next_session() {
    let config = Config::default();
    let docs = Arc::new(MemoryDocumentStore::new());
    let client = HistoryClient::new(docs.clone(), config.store.collection.clone());

    // First viewing session.
    let store = SegmentStore::new();
    let autosave = Autosave::new(store.clone(), client.clone());
    let mut tracker = PlaybackTracker::new(store.clone(), &config, PlayerProps::default());
    tracker.on_loaded(60.0);
    tracker.on_play(0.0).unwrap();
    tracker.on_time_update(1.0).unwrap();
    tracker.on_pause(30.0).unwrap();
    tracker.on_seek(45.0).unwrap();
    tracker.on_play(45.0).unwrap();
    tracker.on_ended(60.0).unwrap();

    assert!(autosave.save_now().await.unwrap().is_some());

    // Second session loads history into a read-only view.
    let history = client.get_history().await.unwrap();
    assert_eq!(history, vec![seg(0.0, 30.0), seg(45.0, 60.0)]);

    let mut viewer = PlaybackTracker::new(
        SegmentStore::new(),
        &config,
        PlayerProps {
            read_only: true,
            history,
        },
    );
    viewer.on_loaded(60.0);
    viewer.on_play(0.0).unwrap();
    viewer.on_pause(10.0).unwrap();
    assert!(viewer.store().is_empty());

    let series = build_heatmap(&viewer.display_segments(), 60.0, 2).unwrap();
    assert_eq!(series.values, vec![1.0, 0.5]);

    let chart = HeatmapChart::new(&series, &config.chart).to_json();
    assert_eq!(chart["data"]["datasets"][0]["data"], serde_json::json!([1.0, 0.5]));
}

#[tokio::test]
async fn seeding_a_store_from_history() {
    let docs = Arc::new(MemoryDocumentStore::new());
    let client = HistoryClient::new(docs, "watchSegments");
    client.save_segments(&[seg(0.0, 10.0)]).await.unwrap();
    client.save_segments(&[seg(20.0, 40.0)]).await.unwrap();

    let store = SegmentStore::new();
    let kept = store.seed(client.get_history().await.unwrap());
    assert_eq!(kept, 2);
    assert_eq!(store.len(), 2);

    store.clear_segments();
    assert!(store.is_empty());
}

#[tokio::test]
async fn history_grows_by_new_segments_only_across_sessions() {
    let docs = Arc::new(MemoryDocumentStore::new());
    let client = HistoryClient::new(docs.clone(), "watchSegments");

    for session in 0..3 {
        let store = SegmentStore::new();
        store.seed(client.get_history().await.unwrap());
        let autosave = Autosave::new(store.clone(), client.clone());
        assert!(!autosave.is_dirty());

        let start = session as f64 * 20.0;
        store.add_segment(start, start + 10.0).unwrap();
        autosave.save_now().await.unwrap();

        assert_eq!(client.get_history().await.unwrap().len(), session + 1);
    }
    assert_eq!(docs.document_count("watchSegments"), 3);
}

#[tokio::test(start_paused = true)]
async fn autosave_follows_configured_interval() {
    let config = Config::default();
    let docs = Arc::new(MemoryDocumentStore::new());
    let client = HistoryClient::new(docs.clone(), config.store.collection.clone());
    let store = SegmentStore::new();

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let worker = AutosaveWorker::new(
        Autosave::new(store.clone(), client),
        config.player.save_interval(),
        shutdown_rx,
    );
    let handle = tokio::spawn(worker.run());

    let mut tracker = PlaybackTracker::new(store.clone(), &config, PlayerProps::default());
    tracker.on_loaded(300.0);
    tracker.on_play(0.0).unwrap();
    tracker.on_pause(12.0).unwrap();

    tokio::time::sleep(Duration::from_millis(4900)).await;
    assert_eq!(docs.document_count("watchSegments"), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(docs.document_count("watchSegments"), 1);

    shutdown_tx.send(()).await.unwrap();
    handle.await.unwrap();
    assert_eq!(docs.document_count("watchSegments"), 1);
}
