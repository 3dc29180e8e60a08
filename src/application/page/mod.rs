// SPDX-License-Identifier: MPL-2.0
//! Gallery page lifecycle.
//!
//! [`GalleryPage`] composes one gallery session with its scoped listeners:
//! the inactivity guard (redirects to the event login when it fires), the
//! scroll observer (reveals the next page) and the long-press driver
//! (offers the pressed item for download). All are released on every exit
//! path, including drop.

pub mod events;
pub mod guard;
pub mod press;
pub mod scroll;
pub mod subscription;

pub use events::{PageEvent, PageEvents};
pub use guard::start_inactivity_guard;
pub use press::watch_long_press;
pub use scroll::observe_scroll_proximity;
pub use subscription::ScopedSubscription;

use crate::app::Route;
use crate::application::gallery::{GalleryLoader, GallerySession, GalleryView};
use crate::application::lock;
use crate::application::port::GallerySource;
use crate::domain::error::ValidationError;
use crate::domain::gallery::{GalleryItem, Identifier};
use crate::domain::session::{InactivityTimeout, LongPressThreshold, LookaheadMargin, PageSize};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Timing knobs of a gallery page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSettings {
    pub page_size: PageSize,
    pub inactivity_timeout: InactivityTimeout,
    pub lookahead: LookaheadMargin,
    pub long_press: LongPressThreshold,
}

/// A mounted gallery page.
pub struct GalleryPage<S> {
    loader: GalleryLoader<S>,
    session: Arc<Mutex<GallerySession>>,
    events: PageEvents,
    settings: PageSettings,
    navigation: Arc<watch::Sender<Option<Route>>>,
    download_hint: Arc<watch::Sender<Option<GalleryItem>>>,
    guard: Option<ScopedSubscription>,
    observer: Option<ScopedSubscription>,
    press: Option<ScopedSubscription>,
}

impl<S: GallerySource> GalleryPage<S> {
    #[must_use]
    pub fn new(loader: GalleryLoader<S>, settings: PageSettings) -> Self {
        let session = GallerySession::new(loader.kind(), settings.page_size);
        let (navigation, _) = watch::channel(None);
        let (download_hint, _) = watch::channel(None);
        Self {
            loader,
            session: Arc::new(Mutex::new(session)),
            events: PageEvents::new(),
            settings,
            navigation: Arc::new(navigation),
            download_hint: Arc::new(download_hint),
            guard: None,
            observer: None,
            press: None,
        }
    }

    /// Event bus the host publishes input and viewport events on.
    #[must_use]
    pub fn events(&self) -> &PageEvents {
        &self.events
    }

    /// Receives the route to navigate to once the session ends.
    #[must_use]
    pub fn navigation(&self) -> watch::Receiver<Option<Route>> {
        self.navigation.subscribe()
    }

    /// Receives the item last held down long enough to offer a download.
    #[must_use]
    pub fn download_hints(&self) -> watch::Receiver<Option<GalleryItem>> {
        self.download_hint.subscribe()
    }

    /// Mounts the page for `identifier` (or switches to it) and loads it.
    ///
    /// Listeners from a previous identifier are released first. The scroll
    /// observer and the long-press driver start once the first snapshot
    /// has items. Must be called
    /// inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for a blank identifier;
    /// nothing is fetched and no listener is started.
    pub async fn mount(&mut self, identifier: &str) -> Result<GalleryView, ValidationError> {
        self.release_listeners();
        lock(&self.session).remount();

        let parsed = match Identifier::parse(identifier) {
            Ok(id) => id,
            Err(err) => {
                // Invalidate any in-flight load and record the view state.
                let _ = lock(&self.session).begin_load(identifier);
                return Err(err);
            }
        };

        let navigation = Arc::clone(&self.navigation);
        let login = Route::login_for(Some(parsed.as_str()));
        self.guard = Some(start_inactivity_guard(
            &self.events,
            self.settings.inactivity_timeout,
            move || {
                navigation.send_replace(Some(login));
            },
        ));

        log::info!(
            "Mounting {} gallery for {}",
            self.loader.kind().path_segment(),
            parsed
        );
        self.loader.load_into(&self.session, parsed.as_str()).await?;

        let view = self.view();
        if matches!(view, GalleryView::Populated { .. }) {
            let session = Arc::clone(&self.session);
            self.observer = Some(observe_scroll_proximity(
                &self.events,
                self.settings.lookahead,
                move || {
                    if lock(&session).near_end() {
                        log::debug!("Revealed next gallery page");
                    }
                },
            ));

            let session = Arc::clone(&self.session);
            let download_hint = Arc::clone(&self.download_hint);
            self.press = Some(watch_long_press(
                &self.events,
                self.settings.long_press,
                move |index| {
                    let item = lock(&session).visible_items().get(index).cloned();
                    if let Some(item) = item {
                        download_hint.send_replace(Some(item));
                    }
                },
            ));
        }
        Ok(view)
    }

    #[must_use]
    pub fn view(&self) -> GalleryView {
        lock(&self.session).view()
    }

    /// Copies of the items currently rendered.
    #[must_use]
    pub fn visible_items(&self) -> Vec<GalleryItem> {
        lock(&self.session).visible_items().to_vec()
    }

    /// Reveals the next page directly, as a "load more" action would.
    pub fn show_more(&self) -> bool {
        lock(&self.session).near_end()
    }

    /// Shared handle to the session state.
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<GallerySession>> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.guard.is_some() || self.observer.is_some() || self.press.is_some()
    }

    /// Leaves the page: pending loads are ignored, listeners released.
    pub fn unmount(&mut self) {
        lock(&self.session).unmount();
        self.release_listeners();
    }

    fn release_listeners(&mut self) {
        if let Some(mut guard) = self.guard.take() {
            guard.dispose();
        }
        if let Some(mut observer) = self.observer.take() {
            observer.dispose();
        }
        if let Some(mut press) = self.press.take() {
            press.dispose();
        }
    }
}

impl<S> Drop for GalleryPage<S> {
    fn drop(&mut self) {
        // Listeners dispose themselves when the fields drop.
        lock(&self.session).unmount();
    }
}
