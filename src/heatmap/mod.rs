//! Watched-density heatmap derivation.
//!
//! The video duration is split into equal-width buckets and each bucket gets
//! the fraction of its seconds covered by the union of watched segments.
//! Overlapping segments are merged first, so re-watching the same footage does
//! not push a bucket above 1.0.

mod chart;

pub use chart::{ChartDataset, HeatmapChart};

use serde::{Deserialize, Serialize};
use watchtrail_common::{Error, Result, WatchSegment};

/// Density series ready for the chart renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSeries {
    /// Coverage per bucket, each in `[0, 1]`.
    pub values: Vec<f64>,
    /// Bucket start times in seconds.
    pub labels: Vec<f64>,
}

impl HeatmapSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Width of a single bucket in seconds, read off the labels. `None` when
    /// the series has fewer than two buckets.
    pub fn bucket_width(&self) -> Option<f64> {
        match self.labels.as_slice() {
            [] => None,
            [_] => None,
            [first, second, ..] => Some(second - first),
        }
    }
}

/// Build the heatmap for `segments` over `[0, duration)` split into `buckets`.
///
/// Segments are clipped to the video duration; anything outside is ignored.
/// Fails with [`Error::InvalidInput`] when `duration` is not a positive finite
/// number or `buckets` is zero.
pub fn build_heatmap(
    segments: &[WatchSegment],
    duration: f64,
    buckets: usize,
) -> Result<HeatmapSeries> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::invalid_input(format!(
            "heatmap duration must be positive, got {}",
            duration
        )));
    }
    if buckets == 0 {
        return Err(Error::invalid_input("heatmap bucket count cannot be 0"));
    }

    let width = duration / buckets as f64;
    let labels: Vec<f64> = (0..buckets).map(|i| i as f64 * width).collect();
    let mut covered = vec![0.0_f64; buckets];

    let clipped: Vec<WatchSegment> = segments
        .iter()
        .filter_map(|s| clip(s, duration))
        .collect();

    // Each merged interval only visits the buckets it spans (plus one on each
    // side to absorb rounding in the index math).
    for interval in merge_segments(&clipped) {
        let first = ((interval.start / width).floor() as usize)
            .saturating_sub(1)
            .min(buckets - 1);
        let last = ((interval.end / width).ceil() as usize + 1).clamp(first + 1, buckets);

        for (i, slot) in covered.iter_mut().enumerate().take(last).skip(first) {
            let lo = labels[i];
            let hi = if i + 1 == buckets { duration } else { labels[i + 1] };
            *slot += interval.overlap(lo, hi);
        }
    }

    let values = covered
        .into_iter()
        .enumerate()
        .map(|(i, secs)| {
            let hi = if i + 1 == buckets { duration } else { labels[i + 1] };
            let span = hi - labels[i];
            if span > 0.0 {
                (secs / span).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect();

    tracing::trace!(
        "Built heatmap: {} segments, {} buckets of {:.3}s",
        segments.len(),
        buckets,
        width
    );

    Ok(HeatmapSeries { values, labels })
}

/// Union of the given segments, sorted by start time.
///
/// Touching segments (`a.end == b.start`) are joined. Invalid segments are
/// dropped.
pub fn merge_segments(segments: &[WatchSegment]) -> Vec<WatchSegment> {
    let mut sorted: Vec<WatchSegment> = segments.iter().copied().filter(|s| s.is_valid()).collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<WatchSegment> = Vec::with_capacity(sorted.len());
    for segment in sorted {
        match merged.last_mut() {
            Some(last) if segment.start <= last.end => {
                last.end = last.end.max(segment.end);
            }
            _ => merged.push(segment),
        }
    }
    merged
}

/// Distinct seconds watched, with overlaps counted once.
pub fn watched_seconds(segments: &[WatchSegment]) -> f64 {
    merge_segments(segments)
        .iter()
        .map(WatchSegment::duration)
        .sum()
}

/// Fraction of `[0, duration]` that has been watched.
pub fn watched_fraction(segments: &[WatchSegment], duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }
    let clipped: Vec<WatchSegment> = segments
        .iter()
        .filter_map(|s| clip(s, duration))
        .collect();
    (watched_seconds(&clipped) / duration).clamp(0.0, 1.0)
}

fn clip(segment: &WatchSegment, duration: f64) -> Option<WatchSegment> {
    let start = segment.start.max(0.0);
    let end = segment.end.min(duration);
    WatchSegment::new(start, end).ok()
}
