use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Result};

/// Upload category. Each kind owns one record slot and one playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Eeg,
    VitalsWaves,
    VitalsNumerics,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Eeg,
        RecordKind::VitalsWaves,
        RecordKind::VitalsNumerics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Eeg => "eeg",
            RecordKind::VitalsWaves => "vitals_waves",
            RecordKind::VitalsNumerics => "vitals_numerics",
        }
    }

    /// Trend statistic used when a request does not name one. EEG and
    /// waveform trends track signal power; numerics are already low-rate
    /// and are averaged as-is.
    pub fn default_trend_method(&self) -> TrendMethod {
        match self {
            RecordKind::Eeg | RecordKind::VitalsWaves => TrendMethod::RmsWindowed,
            RecordKind::VitalsNumerics => TrendMethod::MeanResample,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            RecordKind::Eeg => 0,
            RecordKind::VitalsWaves => 1,
            RecordKind::VitalsNumerics => 2,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "eeg" => Ok(RecordKind::Eeg),
            "vitals_waves" => Ok(RecordKind::VitalsWaves),
            "vitals_numerics" => Ok(RecordKind::VitalsNumerics),
            other => Err(format!("Unknown record kind: {}", other)),
        }
    }
}

/// Trend aggregation statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMethod {
    RmsWindowed,
    MeanResample,
}

impl FromStr for TrendMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rms" | "rms_windowed" => Ok(TrendMethod::RmsWindowed),
            "mean" | "mean_resample" => Ok(TrendMethod::MeanResample),
            other => Err(format!("Unknown trend method: {}", other)),
        }
    }
}

/// One channel of a record: a time axis in seconds (strictly increasing)
/// and one value per timestamp. Channels within a record may have
/// different lengths and rates; nothing forces a shared grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSeries {
    pub label: String,
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    pub sample_rate: Option<f64>,
}

impl ChannelSeries {
    pub fn new(label: impl Into<String>, times: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            times,
            values,
            sample_rate: None,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    fn validate(&self) -> Result<()> {
        if self.times.len() != self.values.len() {
            return Err(RecordError::MalformedRecord(format!(
                "Channel '{}' has {} timestamps but {} values",
                self.label,
                self.times.len(),
                self.values.len()
            )));
        }
        for pair in self.times.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RecordError::MalformedRecord(format!(
                    "Channel '{}' timestamps are not strictly increasing ({} then {})",
                    self.label, pair[0], pair[1]
                )));
            }
        }
        Ok(())
    }
}

/// One uploaded dataset, normalized. Immutable once built; a new upload
/// replaces the whole record (never mutates it in place).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    pub kind: RecordKind,
    pub channels: BTreeMap<String, ChannelSeries>,
    pub duration: f64,
    pub created_at: String,
}

impl ChannelRecord {
    /// Build a record from parsed channels, enforcing the record
    /// invariants: equal-length axes, strictly increasing timestamps,
    /// unique channel ids, at least one channel with samples.
    pub fn new(kind: RecordKind, series: Vec<ChannelSeries>) -> Result<Self> {
        if series.is_empty() {
            return Err(RecordError::EmptyRecord);
        }

        let mut channels = BTreeMap::new();
        let mut duration: Option<f64> = None;
        for ch in series {
            ch.validate()?;
            if channels.contains_key(&ch.label) {
                return Err(RecordError::MalformedRecord(format!(
                    "Duplicate channel id: '{}'",
                    ch.label
                )));
            }
            if let Some(last) = ch.last_time() {
                duration = Some(duration.map_or(last, |d: f64| d.max(last)));
            }
            channels.insert(ch.label.clone(), ch);
        }

        // A record whose channels all carry zero samples has nothing to
        // window or aggregate.
        let duration = duration.ok_or(RecordError::EmptyRecord)?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            channels,
            duration,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn channel_ids(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id.clone(),
            kind: self.kind,
            channels: self.channel_ids(),
            num_samples: self.channels.values().map(|c| c.len()).sum(),
            duration: self.duration,
            created_at: self.created_at.clone(),
        }
    }
}

/// Compact description of a loaded record, returned by ingest and info
/// requests instead of the full sample data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub kind: RecordKind,
    pub channels: Vec<String>,
    pub num_samples: usize,
    pub duration: f64,
    pub created_at: String,
}

/// Samples of one channel inside a served window, with display scale hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelWindow {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    pub scale_min: f64,
    pub scale_max: f64,
}

/// One served live window across all channels of a record. Produced fresh
/// per request; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResult {
    pub window_start: f64,
    pub window_end: f64,
    pub channels: BTreeMap<String, ChannelWindow>,
}

impl WindowResult {
    /// True when the requested window ran past the end of the record and
    /// was clamped.
    pub fn is_truncated(&self, requested_length: f64) -> bool {
        self.window_end < self.window_start + requested_length
    }
}

/// Fixed-size decimated summary of one channel over the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub label: String,
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
