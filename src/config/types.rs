use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub chart: ChartStyle,

    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Seconds skipped by the seek forward/backward controls
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    #[serde(default = "default_volume")]
    pub default_volume: f64,

    #[serde(default = "default_min_volume")]
    pub min_volume: f64,

    #[serde(default = "default_max_volume")]
    pub max_volume: f64,

    /// How often the watched segments are written to the history store
    #[serde(default = "default_save_interval")]
    pub save_interval_ms: u64,

    /// A time update that jumps further than this is treated as a seek
    #[serde(default = "default_seek_gap")]
    pub seek_gap_secs: f64,
}

fn default_seek_step() -> f64 {
    10.0
}
fn default_volume() -> f64 {
    1.0
}
fn default_min_volume() -> f64 {
    0.0
}
fn default_max_volume() -> f64 {
    1.0
}
fn default_save_interval() -> u64 {
    5000
}
fn default_seek_gap() -> f64 {
    2.0
}

impl PlayerConfig {
    pub fn save_interval(&self) -> Duration {
        Duration::from_millis(self.save_interval_ms)
    }

    /// Clamp a volume level into the configured bounds.
    pub fn clamp_volume(&self, volume: f64) -> f64 {
        if volume.is_nan() {
            return self.default_volume;
        }
        volume.max(self.min_volume).min(self.max_volume)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step(),
            default_volume: default_volume(),
            min_volume: default_min_volume(),
            max_volume: default_max_volume(),
            save_interval_ms: default_save_interval(),
            seek_gap_secs: default_seek_gap(),
        }
    }
}

/// Static styling handed to the chart renderer with every heatmap.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartStyle {
    #[serde(default = "default_border_color")]
    pub border_color: String,

    #[serde(default = "default_background_color")]
    pub background_color: String,

    #[serde(default = "default_line_tension")]
    pub line_tension: f64,

    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

fn default_border_color() -> String {
    "rgba(0, 123, 255, 1)".to_string()
}
fn default_background_color() -> String {
    "rgba(0, 123, 255, 0.3)".to_string()
}
fn default_line_tension() -> f64 {
    0.4
}
fn default_line_width() -> f64 {
    2.0
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_color: default_border_color(),
            background_color: default_background_color(),
            line_tension: default_line_tension(),
            line_width: default_line_width(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeatmapConfig {
    /// Number of equal-width buckets the video duration is split into
    #[serde(default = "default_buckets")]
    pub buckets: usize,
}

fn default_buckets() -> usize {
    100
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the document store API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection watch documents are written to and listed from
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Request timeout for store calls, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_collection() -> String {
    "watchSegments".to_string()
}
fn default_timeout() -> u64 {
    10
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_secs: default_timeout(),
        }
    }
}
