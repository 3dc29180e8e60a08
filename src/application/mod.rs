// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`gallery`]: Gallery loading and per-page session state
//! - [`page`]: Page event bus and the runtime drivers listening to it
//! - [`account`]: Login, registration and search-result flows
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The binary wires adapters into these use cases
//!
//! # Example
//!
//! ```ignore
//! use event_lens::application::gallery::{GalleryLoader, GallerySession};
//! use event_lens::domain::gallery::GalleryKind;
//! use event_lens::domain::session::PageSize;
//!
//! let loader = GalleryLoader::new(api_client, GalleryKind::General);
//! let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::PHOTOS));
//! loader.load_into(&session, "evento-teste").await?;
//! ```

pub mod account;
pub mod gallery;
pub mod page;
pub mod port;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
