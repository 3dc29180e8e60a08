// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **API**: Remote endpoint and request limits
//! - **Gallery**: Page sizes and scroll lookahead
//! - **Session**: Inactivity expiry and long-press timing

// ==========================================================================
// API Defaults
// ==========================================================================

/// Base URL of the event API when neither config nor environment set one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default timeout for a single API request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u32 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u32 = 600;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("EventLens/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Items revealed per scroll step in photo grids.
pub const DEFAULT_PHOTO_PAGE_SIZE: usize = 24;

/// Items revealed per scroll step in video grids.
pub const DEFAULT_VIDEO_PAGE_SIZE: usize = 16;

/// Lookahead margin before the end of the list (in pixels).
pub const DEFAULT_LOOKAHEAD_PX: u32 = 200;

// ==========================================================================
// Session Defaults
// ==========================================================================

/// Inactivity period after which the browsing session expires (in seconds).
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u32 = 300;

/// Hold duration that turns a press into a long press (in milliseconds).
pub const DEFAULT_LONG_PRESS_MS: u32 = 600;
