// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`FetchError`](error::FetchError),
//!   [`AuthError`](error::AuthError), [`ValidationError`](error::ValidationError))
//! - [`gallery`]: Gallery types ([`GalleryItem`](gallery::GalleryItem),
//!   [`GallerySnapshot`](gallery::GallerySnapshot), [`DisplayWindow`](gallery::DisplayWindow))
//! - [`session`]: Session state machines ([`InactivityTimer`](session::InactivityTimer),
//!   [`ProximityDetector`](session::ProximityDetector), [`LongPress`](session::LongPress))

pub mod error;
pub mod gallery;
pub mod session;
