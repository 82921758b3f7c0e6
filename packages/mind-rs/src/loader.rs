// Upload parsing for the two supported wire formats.
//
// CSV: first column is the time axis in seconds, remaining columns are
// channels. An optional header row names the channels (detected when the
// first row is non-numeric). Empty cells mean "no sample for this channel
// at this time", which is how per-channel irregular rates enter via CSV.
//
// JSON: {"channels": [{"label", "times", "values", "sample_rate"?}]} or a
// bare array of channel objects. `times` may be omitted when `sample_rate`
// is given, in which case timestamps are synthesized as i / sample_rate.

use rayon::prelude::*;
use serde::Deserialize;

use crate::error::{RecordError, Result};
use crate::types::{ChannelRecord, ChannelSeries, RecordKind};

/// Parse uploaded bytes into a validated `ChannelRecord`. The format is
/// detected by sniffing the payload: JSON payloads open with `{` or `[`,
/// anything else is treated as CSV.
pub fn load_record(kind: RecordKind, raw: &[u8]) -> Result<ChannelRecord> {
    let first = match raw.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(&b) => b,
        None => return Err(RecordError::EmptyRecord),
    };

    let record = if first == b'{' || first == b'[' {
        parse_json(kind, raw, first == b'[')?
    } else {
        parse_csv(kind, raw)?
    };

    log::debug!(
        "Loaded {} record {}: {} channels over {:.2}s",
        record.kind,
        record.id,
        record.channels.len(),
        record.duration
    );
    Ok(record)
}

#[derive(Debug, Deserialize)]
struct RawUpload {
    channels: Vec<RawChannel>,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    label: String,
    #[serde(default)]
    times: Option<Vec<f64>>,
    values: Vec<f64>,
    #[serde(default)]
    sample_rate: Option<f64>,
}

fn parse_json(kind: RecordKind, raw: &[u8], bare_array: bool) -> Result<ChannelRecord> {
    let channels: Vec<RawChannel> = if bare_array {
        serde_json::from_slice(raw)
            .map_err(|e| RecordError::MalformedRecord(format!("Invalid JSON upload: {}", e)))?
    } else {
        let upload: RawUpload = serde_json::from_slice(raw)
            .map_err(|e| RecordError::MalformedRecord(format!("Invalid JSON upload: {}", e)))?;
        upload.channels
    };

    let mut series = Vec::with_capacity(channels.len());
    for ch in channels {
        let times = match (ch.times, ch.sample_rate) {
            (Some(times), _) => times,
            (None, Some(rate)) if rate > 0.0 => {
                (0..ch.values.len()).map(|i| i as f64 / rate).collect()
            }
            (None, _) => {
                return Err(RecordError::MalformedRecord(format!(
                    "Channel '{}' has no time axis and no usable sample_rate",
                    ch.label
                )))
            }
        };
        let mut parsed = ChannelSeries::new(ch.label, times, ch.values);
        parsed.sample_rate = ch.sample_rate;
        series.push(parsed);
    }

    ChannelRecord::new(kind, series)
}

fn parse_csv(kind: RecordKind, raw: &[u8]) -> Result<ChannelRecord> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| RecordError::MalformedRecord("Upload is not valid UTF-8".to_string()))?;

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(RecordError::EmptyRecord);
    }

    let first_row = split_row(lines[0]);
    let has_header = first_row
        .iter()
        .any(|cell| !cell.is_empty() && cell.parse::<f64>().is_err());

    let (labels, data_start) = if has_header {
        let mut labels = Vec::with_capacity(first_row.len().saturating_sub(1));
        for (col, cell) in first_row.iter().enumerate().skip(1) {
            if cell.is_empty() {
                return Err(RecordError::MalformedRecord(format!(
                    "Empty channel name in header column {}",
                    col + 1
                )));
            }
            labels.push(cell.to_string());
        }
        (labels, 1)
    } else {
        let labels = (1..first_row.len())
            .map(|i| format!("Channel {}", i))
            .collect();
        (labels, 0)
    };

    if labels.is_empty() {
        return Err(RecordError::EmptyRecord);
    }
    let width = labels.len() + 1;

    // Row-parallel parsing, keeping original line numbers for error context.
    let rows: Vec<(f64, Vec<Option<f64>>)> = lines
        .par_iter()
        .enumerate()
        .skip(data_start)
        .map(|(line_idx, line)| parse_row(line, line_idx + 1, width))
        .collect::<Result<Vec<_>>>()?;

    // Transpose rows into per-channel series, dropping gap cells so each
    // channel keeps its own time axis.
    let mut series: Vec<ChannelSeries> = labels
        .into_iter()
        .map(|label| ChannelSeries::new(label, Vec::new(), Vec::new()))
        .collect();
    for (time, values) in rows {
        for (ch, value) in values.into_iter().enumerate() {
            if let Some(value) = value {
                series[ch].times.push(time);
                series[ch].values.push(value);
            }
        }
    }

    ChannelRecord::new(kind, series)
}

fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_row(line: &str, line_no: usize, width: usize) -> Result<(f64, Vec<Option<f64>>)> {
    let cells = split_row(line);
    if cells.len() != width {
        return Err(RecordError::MalformedRecord(format!(
            "Line {} has {} values, expected {}",
            line_no,
            cells.len(),
            width
        )));
    }

    let time = cells[0].parse::<f64>().map_err(|_| {
        RecordError::MalformedRecord(format!(
            "Invalid time value '{}' at line {}",
            cells[0], line_no
        ))
    })?;

    let values = cells[1..]
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            if cell.is_empty() {
                Ok(None)
            } else {
                cell.parse::<f64>().map(Some).map_err(|_| {
                    RecordError::MalformedRecord(format!(
                        "Invalid numeric value '{}' at line {}, column {}",
                        cell,
                        line_no,
                        col + 2
                    ))
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((time, values))
}
