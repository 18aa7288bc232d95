//! Playback event tracking and player controls.
//!
//! The host player forwards its media events here. While playing, the tracker
//! keeps an open interval starting at the store's current start cursor; a
//! pause, seek, or end of media closes it and records it as a watch segment.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use watchtrail_common::{Result, WatchSegment};

use crate::config::{Config, HeatmapConfig, PlayerConfig};
use crate::format::format_time;
use crate::heatmap::{build_heatmap, HeatmapSeries};
use crate::segments::SegmentStore;

/// Embedding options supplied by the host page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProps {
    /// Show history without recording anything new.
    #[serde(default)]
    pub read_only: bool,

    /// Previously watched segments to display.
    #[serde(default)]
    pub history: Vec<WatchSegment>,
}

/// State rendered by the player control bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsState {
    pub duration: f64,
    pub current_time: f64,
    pub is_playing: bool,
    pub volume: f64,
    pub is_muted: bool,
}

pub struct PlaybackTracker {
    store: Arc<SegmentStore>,
    config: PlayerConfig,
    heatmap: HeatmapConfig,
    props: PlayerProps,
    duration: f64,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
}

impl PlaybackTracker {
    pub fn new(store: Arc<SegmentStore>, config: &Config, props: PlayerProps) -> Self {
        Self {
            store,
            volume: config.player.clamp_volume(config.player.default_volume),
            config: config.player.clone(),
            heatmap: config.heatmap.clone(),
            props,
            duration: 0.0,
            position: 0.0,
            playing: false,
            muted: false,
        }
    }

    pub fn store(&self) -> &Arc<SegmentStore> {
        &self.store
    }

    pub fn is_read_only(&self) -> bool {
        self.props.read_only
    }

    /// Media metadata loaded; duration is now known.
    pub fn on_loaded(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
    }

    /// Playback started or resumed.
    ///
    /// Hosts re-emit play after buffering; while already playing this is a
    /// position update and the open interval stays open.
    pub fn on_play(&mut self, position: f64) -> Result<Option<WatchSegment>> {
        if self.playing {
            return self.on_time_update(position);
        }

        self.position = self.clamp_position(position);
        self.playing = true;
        if !self.props.read_only {
            self.store.set_current_start(self.position);
        }
        Ok(None)
    }

    /// Regular position update while the media plays.
    ///
    /// A jump larger than the configured seek gap means the host seeked
    /// without telling us, so the open interval is closed at the last known
    /// position and reopened at the new one.
    pub fn on_time_update(&mut self, position: f64) -> Result<Option<WatchSegment>> {
        let position = self.clamp_position(position);
        if !self.playing {
            self.position = position;
            return Ok(None);
        }

        if (position - self.position).abs() > self.config.seek_gap_secs {
            tracing::debug!(
                "Detected jump from {:.2} to {:.2}, treating as seek",
                self.position,
                position
            );
            return self.on_seek(position);
        }

        self.position = position;
        Ok(None)
    }

    pub fn on_seek(&mut self, to: f64) -> Result<Option<WatchSegment>> {
        let recorded = if self.playing {
            self.close_interval(self.position)?
        } else {
            None
        };

        self.position = self.clamp_position(to);
        if !self.props.read_only {
            self.store.set_current_start(self.position);
        }
        Ok(recorded)
    }

    pub fn on_pause(&mut self, position: f64) -> Result<Option<WatchSegment>> {
        self.position = self.clamp_position(position);
        let recorded = if self.playing {
            self.close_interval(self.position)?
        } else {
            None
        };
        self.playing = false;
        Ok(recorded)
    }

    pub fn on_ended(&mut self, position: f64) -> Result<Option<WatchSegment>> {
        self.on_pause(position)
    }

    pub fn seek_forward(&mut self) -> Result<Option<WatchSegment>> {
        let target = self.position + self.config.seek_step_secs;
        self.on_seek(target)
    }

    pub fn seek_backward(&mut self) -> Result<Option<WatchSegment>> {
        let target = self.position - self.config.seek_step_secs;
        self.on_seek(target)
    }

    pub fn set_volume(&mut self, volume: f64) -> f64 {
        self.volume = self.config.clamp_volume(volume);
        if self.volume > self.config.min_volume {
            self.muted = false;
        }
        self.volume
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn controls(&self) -> ControlsState {
        ControlsState {
            duration: self.duration,
            current_time: self.position,
            is_playing: self.playing,
            volume: self.volume,
            is_muted: self.muted,
        }
    }

    /// `current / total` label for the control bar.
    pub fn time_label(&self) -> String {
        format!("{} / {}", format_time(self.position), format_time(self.duration))
    }

    /// Segments the heatmap should show: history from props plus whatever
    /// has been recorded in this session.
    pub fn display_segments(&self) -> Vec<WatchSegment> {
        let mut segments = self.props.history.clone();
        segments.extend(self.store.segments());
        segments
    }

    /// Heatmap over the loaded media, or `None` before the duration is known.
    pub fn heatmap(&self) -> Result<Option<HeatmapSeries>> {
        if self.duration <= 0.0 {
            return Ok(None);
        }
        build_heatmap(&self.display_segments(), self.duration, self.heatmap.buckets).map(Some)
    }

    fn close_interval(&self, end: f64) -> Result<Option<WatchSegment>> {
        if self.props.read_only {
            return Ok(None);
        }

        let start = self.store.current_start();
        if end <= start {
            tracing::trace!("Skipping empty interval [{:.2}, {:.2}]", start, end);
            return Ok(None);
        }

        self.store.add_segment(start, end).map(Some)
    }

    fn clamp_position(&self, position: f64) -> f64 {
        if !position.is_finite() {
            return self.position;
        }
        if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        }
    }
}
