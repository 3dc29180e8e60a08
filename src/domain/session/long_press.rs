// SPDX-License-Identifier: MPL-2.0
//! Long-press detection.
//!
//! Holding a press on a media card for the threshold duration reveals the
//! download hint (and records a download intent). Releasing earlier cancels.

use super::newtypes::LongPressThreshold;
use std::time::Instant;

/// What happened when the press ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No press was in progress.
    Idle,
    /// Released before the threshold; nothing fired.
    Cancelled,
    /// The long press had already fired.
    Completed,
}

/// Tracks one pointer press at a time.
#[derive(Debug, Clone)]
pub struct LongPress {
    threshold: LongPressThreshold,
    pressed_at: Option<Instant>,
    fired: bool,
}

impl LongPress {
    #[must_use]
    pub fn new(threshold: LongPressThreshold) -> Self {
        Self {
            threshold,
            pressed_at: None,
            fired: false,
        }
    }

    /// Starts a press. A press already in progress is restarted.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
        self.fired = false;
    }

    /// Instant at which the current press becomes a long press.
    #[must_use]
    pub fn fires_at(&self) -> Option<Instant> {
        match self.pressed_at {
            Some(at) if !self.fired => Some(at + self.threshold.as_duration()),
            _ => None,
        }
    }

    /// Returns true exactly once per press, when the threshold is reached.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.fires_at() {
            Some(at) if now >= at => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }

    /// Ends the press.
    pub fn release(&mut self, now: Instant) -> ReleaseOutcome {
        if self.pressed_at.is_none() {
            return ReleaseOutcome::Idle;
        }
        // A release exactly at the threshold still counts as a long press.
        let fired = self.fired || self.poll(now);
        self.pressed_at = None;
        self.fired = false;
        if fired {
            ReleaseOutcome::Completed
        } else {
            ReleaseOutcome::Cancelled
        }
    }
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(LongPressThreshold::default())
    }
}
