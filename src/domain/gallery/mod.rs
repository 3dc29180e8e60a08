// SPDX-License-Identifier: MPL-2.0
//! Gallery domain module.
//!
//! Items, deduplicated snapshots and the incremental display window.

pub mod types;
pub mod window;

pub use types::{dedupe_by_key, GalleryItem, GalleryKind, GallerySnapshot, Identifier};
pub use window::{advance_window, DisplayWindow};
