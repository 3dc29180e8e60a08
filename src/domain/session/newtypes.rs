// SPDX-License-Identifier: MPL-2.0
//! Session newtypes.
//!
//! Type-safe wrappers for paging and timing values, always within valid
//! ranges.

use std::time::Duration;

// =============================================================================
// Page Size
// =============================================================================

/// Page size bounds (items revealed per scroll step).
pub mod page_size_bounds {
    /// Minimum page size.
    pub const MIN: usize = 1;
    /// Maximum page size.
    pub const MAX: usize = 200;
    /// Page size for photo grids.
    pub const PHOTOS: usize = 24;
    /// Page size for video grids.
    pub const VIDEOS: usize = 16;
}

/// Number of items revealed per window advance (1–200).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Page size used by photo grids.
    pub const PHOTOS: Self = Self(page_size_bounds::PHOTOS);
    /// Page size used by video grids.
    pub const VIDEOS: Self = Self(page_size_bounds::VIDEOS);

    /// Creates a page size, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(page_size_bounds::MIN, page_size_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::PHOTOS
    }
}

// =============================================================================
// Inactivity Timeout
// =============================================================================

/// Inactivity timeout bounds.
pub mod inactivity_bounds {
    /// Minimum timeout, in milliseconds.
    pub const MIN_MS: u64 = 100;
    /// Maximum timeout (one day), in milliseconds.
    pub const MAX_MS: u64 = 86_400_000;
    /// Default timeout (five minutes), in seconds.
    pub const DEFAULT_SECS: u32 = 300;
}

/// Time without interaction after which a browsing session expires.
///
/// Held with millisecond resolution.
///
/// # Example
///
/// ```
/// use event_lens::domain::session::InactivityTimeout;
///
/// assert_eq!(InactivityTimeout::new(120).as_secs(), 120);
/// assert_eq!(InactivityTimeout::from_millis(1_500).as_millis(), 1_500);
/// assert_eq!(InactivityTimeout::from_millis(0).as_millis(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityTimeout(u64);

impl InactivityTimeout {
    /// Creates a timeout from whole seconds, clamping to the valid range.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self::from_millis(u64::from(secs) * 1_000)
    }

    /// Creates a timeout from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(inactivity_bounds::MIN_MS, inactivity_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Whole seconds, rounded down.
    #[must_use]
    pub fn as_secs(self) -> u64 {
        self.0 / 1_000
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for InactivityTimeout {
    fn default() -> Self {
        Self::new(inactivity_bounds::DEFAULT_SECS)
    }
}

// =============================================================================
// Lookahead Margin
// =============================================================================

/// Lookahead margin bounds, in pixels.
pub mod lookahead_bounds {
    pub const MIN_PX: u32 = 0;
    pub const MAX_PX: u32 = 4_000;
    pub const DEFAULT_PX: u32 = 200;
}

/// Distance before the end of content at which more items are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadMargin(u32);

impl LookaheadMargin {
    #[must_use]
    pub fn new(px: u32) -> Self {
        Self(px.clamp(lookahead_bounds::MIN_PX, lookahead_bounds::MAX_PX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Margin as a floating-point pixel offset.
    #[must_use]
    pub fn as_px(self) -> f32 {
        self.0 as f32
    }
}

impl Default for LookaheadMargin {
    fn default() -> Self {
        Self(lookahead_bounds::DEFAULT_PX)
    }
}

// =============================================================================
// Long Press Threshold
// =============================================================================

/// Long-press threshold bounds, in milliseconds.
pub mod long_press_bounds {
    pub const MIN_MS: u32 = 100;
    pub const MAX_MS: u32 = 5_000;
    pub const DEFAULT_MS: u32 = 600;
}

/// How long a press must be held to count as a long press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressThreshold(u32);

impl LongPressThreshold {
    #[must_use]
    pub fn new(ms: u32) -> Self {
        Self(ms.clamp(long_press_bounds::MIN_MS, long_press_bounds::MAX_MS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for LongPressThreshold {
    fn default() -> Self {
        Self(long_press_bounds::DEFAULT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_clamps_to_valid_range() {
        assert_eq!(PageSize::new(0).value(), page_size_bounds::MIN);
        assert_eq!(PageSize::new(10_000).value(), page_size_bounds::MAX);
        assert_eq!(PageSize::new(24), PageSize::PHOTOS);
    }

    #[test]
    fn page_size_presets() {
        assert_eq!(PageSize::PHOTOS.value(), 24);
        assert_eq!(PageSize::VIDEOS.value(), 16);
        assert_eq!(PageSize::default(), PageSize::PHOTOS);
    }

    #[test]
    fn inactivity_timeout_clamps_and_converts() {
        assert_eq!(InactivityTimeout::new(0).as_millis(), inactivity_bounds::MIN_MS);
        assert_eq!(
            InactivityTimeout::new(u32::MAX).as_millis(),
            inactivity_bounds::MAX_MS
        );
        assert_eq!(
            InactivityTimeout::new(90).as_duration(),
            Duration::from_secs(90)
        );
        assert_eq!(
            InactivityTimeout::default().as_secs(),
            u64::from(inactivity_bounds::DEFAULT_SECS)
        );
    }

    #[test]
    fn inactivity_timeout_keeps_milliseconds() {
        let timeout = InactivityTimeout::from_millis(2_750);
        assert_eq!(timeout.as_duration(), Duration::from_millis(2_750));
        assert_eq!(timeout.as_secs(), 2);
        assert_eq!(InactivityTimeout::from_millis(250).as_millis(), 250);
    }

    #[test]
    fn lookahead_margin_default_and_clamp() {
        assert_eq!(LookaheadMargin::default().value(), 200);
        assert_eq!(LookaheadMargin::new(99_999).value(), lookahead_bounds::MAX_PX);
        assert!((LookaheadMargin::new(150).as_px() - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn long_press_threshold_default_and_clamp() {
        assert_eq!(LongPressThreshold::default().value(), 600);
        assert_eq!(LongPressThreshold::new(1).value(), long_press_bounds::MIN_MS);
        assert_eq!(
            LongPressThreshold::new(600).as_duration(),
            Duration::from_millis(600)
        );
    }
}
