// Playback cursor: the start time of the next live window, advanced once
// per poll. One cursor exists per record kind; cursors never interact.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_LENGTH: f64 = 10.0;
pub const DEFAULT_SCROLL_STEP: f64 = 0.5;

/// Advancing offset state for one record kind. The caller polls faster
/// than the scroll step so consecutive windows overlap and the view
/// appears to move smoothly rather than jump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackCursor {
    pub offset: f64,
    pub window_length: f64,
    pub scroll_step: f64,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_LENGTH, DEFAULT_SCROLL_STEP)
    }
}

impl PlaybackCursor {
    pub fn new(window_length: f64, scroll_step: f64) -> Self {
        Self {
            offset: 0.0,
            window_length,
            scroll_step,
        }
    }

    /// Advance one step and return the offset to serve for this poll (the
    /// offset *before* the advance). When the current offset can no longer
    /// fit a full window the cursor wraps to exactly 0, so replay loops
    /// instead of running off the end of the record. Records shorter than
    /// one window pin the cursor at 0 and always serve a truncated window.
    pub fn advance(&mut self, duration: f64) -> f64 {
        let served = self.offset;
        if self.offset + self.window_length > duration {
            self.offset = 0.0;
        } else {
            self.offset += self.scroll_step;
            // An oversized step could overshoot the record before the wrap
            // check above ever sees it.
            if self.offset >= duration {
                self.offset = 0.0;
            }
        }
        served
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}
