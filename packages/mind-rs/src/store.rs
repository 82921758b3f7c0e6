// In-process record store: one record slot and one playback cursor per
// record kind.
//
// Records are immutable snapshots behind an Arc; ingest swaps the Arc
// wholesale so readers in flight keep a consistent view of the old record.
// The cursor is the only mutable state and is advanced under a mutex, so
// "one poll = one advance" holds under concurrent requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::cursor::{PlaybackCursor, DEFAULT_SCROLL_STEP, DEFAULT_WINDOW_LENGTH};
use crate::error::{RecordError, Result};
use crate::types::{
    ChannelRecord, RecordKind, RecordSummary, TrendMethod, TrendSeries, WindowResult,
};
use crate::{loader, trend, window};

pub const DEFAULT_TREND_POINTS: usize = 200;

/// Engine-level knobs, normally sourced from server configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub window_length: f64,
    pub scroll_step: f64,
    pub trend_points: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            scroll_step: DEFAULT_SCROLL_STEP,
            trend_points: DEFAULT_TREND_POINTS,
        }
    }
}

struct KindSlot {
    record: RwLock<Option<Arc<ChannelRecord>>>,
    cursor: Mutex<PlaybackCursor>,
}

impl KindSlot {
    fn new(config: &StoreConfig) -> Self {
        Self {
            record: RwLock::new(None),
            cursor: Mutex::new(PlaybackCursor::new(
                config.window_length,
                config.scroll_step,
            )),
        }
    }
}

/// The engine facade: ingest, live windows and trend summaries over one
/// record per kind. Cheap to share behind an `Arc`; all methods take
/// `&self`.
pub struct RecordStore {
    config: StoreConfig,
    slots: [KindSlot; 3],
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        let slots = [
            KindSlot::new(&config),
            KindSlot::new(&config),
            KindSlot::new(&config),
        ];
        Self { config, slots }
    }

    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn slot(&self, kind: RecordKind) -> &KindSlot {
        &self.slots[kind.index()]
    }

    /// Parse an upload and replace the record for its kind. The swap is
    /// atomic for concurrent readers and resets that kind's cursor so
    /// replay starts from the beginning of the new record.
    pub fn ingest(&self, kind: RecordKind, raw: &[u8]) -> Result<RecordSummary> {
        let record = loader::load_record(kind, raw)?;
        Ok(self.install(record))
    }

    /// Install an already-built record (used by the synthetic-demo path).
    pub fn install(&self, record: ChannelRecord) -> RecordSummary {
        let summary = record.summary();
        let slot = self.slot(record.kind);

        *slot.record.write() = Some(Arc::new(record));
        slot.cursor.lock().reset();

        log::info!(
            "Installed {} record {} ({} channels, {:.2}s)",
            summary.kind,
            summary.id,
            summary.channels.len(),
            summary.duration
        );
        summary
    }

    /// Snapshot of the currently loaded record for a kind.
    pub fn current(&self, kind: RecordKind) -> Result<Arc<ChannelRecord>> {
        self.slot(kind)
            .record
            .read()
            .clone()
            .ok_or(RecordError::NoRecordLoaded(kind))
    }

    pub fn is_loaded(&self, kind: RecordKind) -> bool {
        self.slot(kind).record.read().is_some()
    }

    /// Drop the record for a kind. Returns whether one was loaded.
    pub fn clear(&self, kind: RecordKind) -> bool {
        let slot = self.slot(kind);
        let removed = slot.record.write().take().is_some();
        slot.cursor.lock().reset();
        removed
    }

    /// One live poll: advance the kind's cursor by one step and extract
    /// the window starting at the pre-advance offset.
    pub fn live_window(&self, kind: RecordKind) -> Result<WindowResult> {
        let record = self.current(kind)?;

        let (offset, window_length) = {
            let mut cursor = self.slot(kind).cursor.lock();
            (cursor.advance(record.duration), cursor.window_length)
        };

        Ok(window::extract(&record, offset, window_length))
    }

    /// Trend summaries for the requested channels (all channels when
    /// `channels` is `None`). A requested-but-absent channel degrades to
    /// an empty series; it never fails the request.
    pub fn trend(
        &self,
        kind: RecordKind,
        channels: Option<&[String]>,
        target_points: Option<usize>,
        method: Option<TrendMethod>,
    ) -> Result<BTreeMap<String, TrendSeries>> {
        let record = self.current(kind)?;
        let points = target_points.unwrap_or(self.config.trend_points);
        let method = method.unwrap_or_else(|| kind.default_trend_method());

        let result = match channels {
            Some(ids) => ids
                .iter()
                .map(|id| {
                    let series = match record.channels.get(id) {
                        Some(ch) => trend::aggregate(ch, points, method),
                        None => TrendSeries::empty(id.clone()),
                    };
                    (id.clone(), series)
                })
                .collect(),
            None => record
                .channels
                .iter()
                .map(|(id, ch)| (id.clone(), trend::aggregate(ch, points, method)))
                .collect(),
        };

        Ok(result)
    }
}
