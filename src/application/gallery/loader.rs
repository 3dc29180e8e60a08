// SPDX-License-Identifier: MPL-2.0
//! Gallery loading use case.
//!
//! One request, then deduplication into a [`GallerySnapshot`]. The loader
//! does not touch shared state; applying the result is the session's job.

use crate::application::port::GallerySource;
use crate::domain::error::FetchError;
use crate::domain::gallery::{GalleryKind, GallerySnapshot, Identifier};

/// Loads deduplicated snapshots of one gallery kind.
#[derive(Debug, Clone)]
pub struct GalleryLoader<S> {
    source: S,
    kind: GalleryKind,
}

impl<S: GallerySource> GalleryLoader<S> {
    #[must_use]
    pub fn new(source: S, kind: GalleryKind) -> Self {
        Self { source, kind }
    }

    #[must_use]
    pub fn kind(&self) -> GalleryKind {
        self.kind
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the feed for `identifier` and deduplicates it by key.
    ///
    /// The identifier type guarantees a non-empty slug, so an invalid
    /// identifier never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the underlying source unchanged.
    pub async fn load(&self, identifier: &Identifier) -> Result<GallerySnapshot, FetchError> {
        let feed = self.source.fetch_items(identifier, self.kind).await?;
        let raw_len = feed.len();
        let snapshot = GallerySnapshot::from_feed(feed);

        log::debug!(
            "Loaded {} {} items for {} ({} duplicates dropped)",
            snapshot.total_count(),
            self.kind.path_segment(),
            identifier,
            raw_len - snapshot.total_count()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::gallery::GalleryItem;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Source replaying canned responses in order.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<GalleryItem>, FetchError>>>,
        calls: AtomicUsize,
        last_kind: Mutex<Option<GalleryKind>>,
    }

    impl ScriptedSource {
        pub(crate) fn with(responses: Vec<Result<Vec<GalleryItem>, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl GallerySource for ScriptedSource {
        async fn fetch_items(
            &self,
            _identifier: &Identifier,
            kind: GalleryKind,
        ) -> Result<Vec<GalleryItem>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_kind.lock().unwrap() = Some(kind);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn load_deduplicates_feed() {
        let source = ScriptedSource::with(vec![Ok(vec![
            GalleryItem::new("a", "u1"),
            GalleryItem::new("b", "u2"),
            GalleryItem::new("a", "u3"),
        ])]);
        let loader = GalleryLoader::new(source, GalleryKind::General);
        let id = Identifier::parse("evento-teste").unwrap();

        let snapshot = loader.load(&id).await.expect("load should succeed");

        assert_eq!(snapshot.total_count(), 2);
        assert_eq!(
            snapshot.items(),
            &[GalleryItem::new("a", "u3"), GalleryItem::new("b", "u2")]
        );
        assert_eq!(loader.source().calls(), 1);
    }

    #[tokio::test]
    async fn load_passes_failure_through() {
        let source = ScriptedSource::with(vec![Err(FetchError::status(500))]);
        let loader = GalleryLoader::new(source, GalleryKind::Videos);
        let id = Identifier::parse("evento").unwrap();

        let err = loader.load(&id).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(
            *loader.source().last_kind.lock().unwrap(),
            Some(GalleryKind::Videos)
        );
    }
}
