// Trend Aggregator: fixed-bin decimation of one channel over the whole
// record. The output size is bounded by `target_points` no matter how many
// raw samples the channel holds.
//
// Bins are equal-width over [first_ts, last_ts], half-open except the final
// bin, which is closed so the last sample lands inside it. Samples arrive
// sorted by time, so one linear pass with a running bin index is enough;
// the cost is O(n), never O(n * target_points).

use crate::types::{ChannelSeries, TrendMethod, TrendSeries};

/// Reduce one channel to at most `target_points` aggregated points.
/// Bins without samples are omitted for both methods: a gap in the source
/// stays a visible gap instead of becoming a fabricated flat value.
pub fn aggregate(series: &ChannelSeries, target_points: usize, method: TrendMethod) -> TrendSeries {
    if target_points == 0 || series.is_empty() {
        return TrendSeries::empty(series.label.clone());
    }

    let t0 = series.times[0];
    let t1 = series.times[series.times.len() - 1];
    let span = t1 - t0;

    if span <= 0.0 {
        // Single timestamp: one bin holding every sample.
        let value = reduce(series.values.iter().copied(), method);
        return TrendSeries {
            label: series.label.clone(),
            times: vec![t0],
            values: vec![value],
        };
    }

    let width = span / target_points as f64;
    let last_bin = target_points - 1;

    let mut times = Vec::new();
    let mut values = Vec::new();
    let mut bin = 0usize;
    let mut acc = 0.0f64;
    let mut count = 0usize;

    let flush = |bin: usize, acc: f64, count: usize, times: &mut Vec<f64>, values: &mut Vec<f64>| {
        if count > 0 {
            let mean = acc / count as f64;
            let value = match method {
                TrendMethod::RmsWindowed => mean.sqrt(),
                TrendMethod::MeanResample => mean,
            };
            times.push(t0 + (bin as f64 + 0.5) * width);
            values.push(value);
        }
    };

    for (&t, &x) in series.times.iter().zip(series.values.iter()) {
        // Floor division assigns a boundary sample to the later bin
        // (half-open bins); the clamp closes the final bin.
        let idx = (((t - t0) / width) as usize).min(last_bin);
        if idx != bin {
            flush(bin, acc, count, &mut times, &mut values);
            bin = idx;
            acc = 0.0;
            count = 0;
        }
        acc += match method {
            TrendMethod::RmsWindowed => x * x,
            TrendMethod::MeanResample => x,
        };
        count += 1;
    }
    flush(bin, acc, count, &mut times, &mut values);

    TrendSeries {
        label: series.label.clone(),
        times,
        values,
    }
}

fn reduce(values: impl Iterator<Item = f64>, method: TrendMethod) -> f64 {
    let mut acc = 0.0f64;
    let mut count = 0usize;
    for x in values {
        acc += match method {
            TrendMethod::RmsWindowed => x * x,
            TrendMethod::MeanResample => x,
        };
        count += 1;
    }
    let mean = acc / count.max(1) as f64;
    match method {
        TrendMethod::RmsWindowed => mean.sqrt(),
        TrendMethod::MeanResample => mean,
    }
}
