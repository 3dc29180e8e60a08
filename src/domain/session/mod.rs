// SPDX-License-Identifier: MPL-2.0
//! Browsing-session domain module.
//!
//! Pure state machines for inactivity expiry, scroll proximity and long
//! presses, plus the value types that configure them.

pub mod inactivity;
pub mod long_press;
pub mod newtypes;
pub mod scroll;

pub use inactivity::{GuardState, InactivityTimer, InteractionKind, Transition, Visibility};
pub use long_press::{LongPress, ReleaseOutcome};
pub use newtypes::{
    inactivity_bounds, long_press_bounds, lookahead_bounds, page_size_bounds,
    InactivityTimeout, LongPressThreshold, LookaheadMargin, PageSize,
};
pub use scroll::{ProximityDetector, SentinelRegion, ViewportGeometry};
