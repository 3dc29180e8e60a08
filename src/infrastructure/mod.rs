// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Platform API client (implements [`GallerySource`])
//! - [`storage`]: In-memory and file-backed session stores (implement [`SessionStore`])
//!
//! [`GallerySource`]: crate::application::port::GallerySource
//! [`SessionStore`]: crate::application::port::SessionStore

pub mod http;
pub mod storage;

pub use http::ApiClient;
pub use storage::{FileSessionStore, MemorySessionStore};
