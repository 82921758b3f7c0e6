// Window Extractor: time-bounded slice across all channels of a record.
//
// Channels keep their native sample axes; nothing is resampled to a shared
// grid. Membership is half-open [offset, window_end), located per channel
// with binary search so a request costs O(log n) per channel plus the
// window's own samples, never a scan of the record.

use std::collections::BTreeMap;

use crate::scale::display_range;
use crate::types::{ChannelRecord, ChannelSeries, ChannelWindow, WindowResult};

/// Extract the window `[offset, offset + window_length)` across all
/// channels. The end is clamped to the record duration; a clamped result
/// signals itself via `window_end < offset + window_length`. A channel
/// with no samples in range degrades to empty sequences instead of
/// failing the request.
pub fn extract(record: &ChannelRecord, offset: f64, window_length: f64) -> WindowResult {
    let window_end = (offset + window_length).min(record.duration);

    let mut channels = BTreeMap::new();
    for (id, series) in &record.channels {
        let (times, values) = slice_series(series, offset, window_end);
        let (scale_min, scale_max) = display_range(&values);
        channels.insert(
            id.clone(),
            ChannelWindow {
                times,
                values,
                scale_min,
                scale_max,
            },
        );
    }

    WindowResult {
        window_start: offset,
        window_end,
        channels,
    }
}

fn slice_series(series: &ChannelSeries, start: f64, end: f64) -> (Vec<f64>, Vec<f64>) {
    if series.is_empty() || end <= start {
        return (Vec::new(), Vec::new());
    }

    let lo = series.times.partition_point(|&t| t < start);
    let hi = series.times.partition_point(|&t| t < end);
    (series.times[lo..hi].to_vec(), series.values[lo..hi].to_vec())
}
