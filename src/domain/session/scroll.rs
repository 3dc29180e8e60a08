// SPDX-License-Identifier: MPL-2.0
//! Scroll proximity detection.
//!
//! Decides when a sentinel region placed after the last rendered item
//! enters the viewport extended by a lookahead margin. Only the entering
//! transition is reported, not every geometry update while intersecting.

use super::newtypes::LookaheadMargin;

/// Vertical extent of the sentinel region, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelRegion {
    pub top: f32,
    pub height: f32,
}

/// Viewport position and the sentinel it watches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Content offset of the viewport's top edge.
    pub scroll_top: f32,
    /// Visible height.
    pub viewport_height: f32,
    /// Region marking the end of the rendered list.
    pub sentinel: SentinelRegion,
}

impl ViewportGeometry {
    /// Returns true if the sentinel overlaps the viewport grown by `margin`
    /// on both edges.
    #[must_use]
    pub fn sentinel_within(&self, margin: LookaheadMargin) -> bool {
        let margin = margin.as_px();
        let view_top = self.scroll_top - margin;
        let view_bottom = self.scroll_top + self.viewport_height + margin;
        let sentinel_bottom = self.sentinel.top + self.sentinel.height.max(0.0);
        self.sentinel.top <= view_bottom && sentinel_bottom >= view_top
    }
}

/// Edge-triggered proximity detector.
#[derive(Debug, Clone)]
pub struct ProximityDetector {
    margin: LookaheadMargin,
    intersecting: bool,
}

impl ProximityDetector {
    #[must_use]
    pub fn new(margin: LookaheadMargin) -> Self {
        Self {
            margin,
            intersecting: false,
        }
    }

    /// Feeds a geometry update. Returns true when the sentinel has just
    /// entered the extended viewport.
    pub fn update(&mut self, geometry: &ViewportGeometry) -> bool {
        let now_intersecting = geometry.sentinel_within(self.margin);
        let entered = now_intersecting && !self.intersecting;
        self.intersecting = now_intersecting;
        entered
    }

    #[must_use]
    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }
}
