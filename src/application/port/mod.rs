// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`gallery`]: Raw gallery feed retrieval
//! - [`session_store`]: Persisted session key/value data
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `reqwest` types)
//! - Traits are `Send + Sync` so adapters can be shared across tasks
//! - Methods return `Result` with domain error types

pub mod gallery;
pub mod session_store;

pub use gallery::GallerySource;
pub use session_store::{keys, SessionStore, StoreError};
