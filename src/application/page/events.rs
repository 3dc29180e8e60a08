// SPDX-License-Identifier: MPL-2.0
//! Page event bus.
//!
//! The host (a UI shell, or the CLI) publishes input and viewport events
//! here; the inactivity guard, the scroll observer and the long-press
//! driver subscribe independently. The latest viewport geometry and page
//! visibility are also kept, so a listener started later, or one that
//! lagged behind the buffer, can catch up.

use crate::application::lock;
use crate::domain::session::{InteractionKind, ViewportGeometry, Visibility};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Buffered events per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 64;

/// Event published by the page host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Interaction(InteractionKind),
    Visibility(Visibility),
    Viewport(ViewportGeometry),
    /// A press started on the item at this position of the rendered list.
    Press(usize),
    /// The press ended (pointer up, touch end or cancel).
    Release,
}

/// Last known page state, shared by every clone of the bus.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Latest {
    pub(crate) viewport: Option<ViewportGeometry>,
    pub(crate) visibility: Visibility,
}

impl Default for Latest {
    fn default() -> Self {
        Self {
            viewport: None,
            visibility: Visibility::Visible,
        }
    }
}

/// Broadcast bus of [`PageEvent`]s. Cloning shares the bus.
#[derive(Debug, Clone)]
pub struct PageEvents {
    tx: broadcast::Sender<PageEvent>,
    latest: Arc<Mutex<Latest>>,
}

impl Default for PageEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEvents {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            tx,
            latest: Arc::default(),
        }
    }

    /// Publishes `event`. Events with no subscriber are dropped, but
    /// geometry and visibility are still remembered.
    pub fn emit(&self, event: PageEvent) {
        match event {
            PageEvent::Viewport(geometry) => lock(&self.latest).viewport = Some(geometry),
            PageEvent::Visibility(visibility) => lock(&self.latest).visibility = visibility,
            _ => {}
        }
        // Send only fails when nobody listens.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.tx.subscribe()
    }

    /// Most recent viewport geometry published, if any.
    #[must_use]
    pub fn last_viewport(&self) -> Option<ViewportGeometry> {
        lock(&self.latest).viewport
    }

    /// Most recent visibility published; visible until told otherwise.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        lock(&self.latest).visibility
    }

    /// Read handle on the remembered state that does not keep the bus open.
    pub(crate) fn latest(&self) -> Arc<Mutex<Latest>> {
        Arc::clone(&self.latest)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn interact(&self, kind: InteractionKind) {
        self.emit(PageEvent::Interaction(kind));
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        self.emit(PageEvent::Visibility(visibility));
    }

    /// Publishes a scroll: both an interaction and the new geometry.
    pub fn scrolled(&self, geometry: ViewportGeometry) {
        self.interact(InteractionKind::Scroll);
        self.emit(PageEvent::Viewport(geometry));
    }

    /// Publishes a press on the item at `index`: a pointer-down
    /// interaction, then the press itself.
    pub fn pressed(&self, index: usize) {
        self.interact(InteractionKind::PointerDown);
        self.emit(PageEvent::Press(index));
    }

    pub fn released(&self) {
        self.emit(PageEvent::Release);
    }
}
