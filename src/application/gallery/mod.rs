// SPDX-License-Identifier: MPL-2.0
//! Gallery use cases: loading snapshots and tracking the page state.

pub mod loader;
pub mod session;

pub use loader::GalleryLoader;
pub use session::{GallerySession, GalleryView, LoadTicket};

use crate::application::lock;
use crate::application::port::GallerySource;
use crate::domain::error::ValidationError;
use std::sync::Mutex;

impl<S: GallerySource> GalleryLoader<S> {
    /// Starts a load on `session`, fetches, and applies the result.
    ///
    /// The session lock is never held across the fetch. Returns whether the
    /// result was applied (false when a newer load started meanwhile or the
    /// page was unmounted).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] without fetching when the
    /// identifier is blank.
    pub async fn load_into(
        &self,
        session: &Mutex<GallerySession>,
        identifier: &str,
    ) -> Result<bool, ValidationError> {
        let ticket = lock(session).begin_load(identifier)?;
        let result = self.load(ticket.identifier()).await;
        Ok(lock(session).apply(ticket, result))
    }
}

#[cfg(test)]
mod tests {
    use super::loader::tests::ScriptedSource;
    use super::*;
    use crate::domain::error::FetchError;
    use crate::domain::gallery::{GalleryItem, GalleryKind};
    use crate::domain::session::PageSize;

    #[tokio::test]
    async fn load_into_applies_loaded_snapshot() {
        let loader = GalleryLoader::new(
            ScriptedSource::with(vec![Ok(vec![
                GalleryItem::new("a", "u1"),
                GalleryItem::new("b", "u2"),
                GalleryItem::new("a", "u3"),
            ])]),
            GalleryKind::General,
        );
        let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::new(1)));

        assert_eq!(loader.load_into(&session, "evento-teste").await, Ok(true));

        let mut guard = session.lock().unwrap();
        assert_eq!(guard.visible_items(), &[GalleryItem::new("a", "u3")]);
        guard.near_end();
        assert_eq!(
            guard.visible_items(),
            &[GalleryItem::new("a", "u3"), GalleryItem::new("b", "u2")]
        );
    }

    #[tokio::test]
    async fn load_into_with_blank_identifier_skips_fetch() {
        let loader = GalleryLoader::new(ScriptedSource::default(), GalleryKind::General);
        let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::PHOTOS));

        assert_eq!(
            loader.load_into(&session, "").await,
            Err(ValidationError::EmptyIdentifier)
        );
        assert_eq!(loader.source().calls(), 0);
    }

    #[tokio::test]
    async fn load_into_surfaces_failure_state() {
        let loader = GalleryLoader::new(
            ScriptedSource::with(vec![Err(FetchError::transport("offline"))]),
            GalleryKind::General,
        );
        let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::PHOTOS));

        assert_eq!(loader.load_into(&session, "evento").await, Ok(true));
        assert_eq!(
            session.lock().unwrap().view(),
            GalleryView::Failed(FetchError::transport("offline"))
        );
    }
}
