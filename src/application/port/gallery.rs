// SPDX-License-Identifier: MPL-2.0
//! Gallery retrieval port definition.
//!
//! This module defines the [`GallerySource`] trait: one request for the raw
//! item feed of an event gallery. Deduplication and windowing happen above
//! this port, so adapters only translate the transport.

use crate::domain::error::FetchError;
use crate::domain::gallery::{GalleryItem, GalleryKind, Identifier};
use std::future::Future;

/// Port for fetching the raw item feed of a gallery.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the returned future must be `Send`
/// so loads can run on a multi-threaded runtime.
///
/// # Example
///
/// ```ignore
/// use event_lens::application::port::GallerySource;
/// use event_lens::domain::gallery::{GalleryKind, Identifier};
///
/// async fn count(source: &impl GallerySource) -> usize {
///     let id = Identifier::parse("evento-teste").unwrap();
///     source
///         .fetch_items(&id, GalleryKind::General)
///         .await
///         .map_or(0, |items| items.len())
/// }
/// ```
pub trait GallerySource: Send + Sync {
    /// Fetches the feed for `identifier`, possibly with duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if:
    /// - The request fails in transport
    /// - The response status is not a success
    /// - The body is not a list of `{ key, url }` objects
    fn fetch_items(
        &self,
        identifier: &Identifier,
        kind: GalleryKind,
    ) -> impl Future<Output = Result<Vec<GalleryItem>, FetchError>> + Send;
}
