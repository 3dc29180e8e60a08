// SPDX-License-Identifier: MPL-2.0
//! Gallery session state.
//!
//! Owns the snapshot and display window of one mounted gallery page and
//! decides which load results may be applied. Every `begin_load` bumps a
//! generation counter; a result carrying an older generation, or arriving
//! after unmount, is dropped.

use crate::domain::error::{FetchError, ValidationError};
use crate::domain::gallery::{
    advance_window, DisplayWindow, GalleryItem, GalleryKind, GallerySnapshot, Identifier,
};
use crate::domain::session::PageSize;

/// Rendering state of a gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryView {
    /// The identifier was empty; nothing was requested.
    InvalidIdentifier,
    /// A load is in flight (or none has started yet).
    Loading,
    /// The load succeeded with no items.
    Empty,
    /// The load failed. Kept distinct from `Empty` so outages do not look
    /// like empty galleries.
    Failed(FetchError),
    /// Items are available.
    Populated {
        total_count: usize,
        window_len: usize,
        has_more: bool,
    },
}

/// Proof that a load was started, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    identifier: Identifier,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    InvalidIdentifier,
    Loading,
    Loaded {
        snapshot: GallerySnapshot,
        window: DisplayWindow,
    },
    Failed(FetchError),
}

/// State of one mounted gallery page.
#[derive(Debug, Clone)]
pub struct GallerySession {
    kind: GalleryKind,
    page_size: PageSize,
    generation: u64,
    mounted: bool,
    identifier: Option<Identifier>,
    phase: Phase,
}

impl GallerySession {
    /// Creates a mounted session with nothing loaded.
    #[must_use]
    pub fn new(kind: GalleryKind, page_size: PageSize) -> Self {
        Self {
            kind,
            page_size,
            generation: 0,
            mounted: true,
            identifier: None,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GalleryKind {
        self.kind
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Starts a load for `raw_identifier`.
    ///
    /// Any load still in flight becomes stale, whether or not the new
    /// identifier is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for a blank identifier;
    /// the session then renders [`GalleryView::InvalidIdentifier`].
    pub fn begin_load(&mut self, raw_identifier: &str) -> Result<LoadTicket, ValidationError> {
        self.generation += 1;
        match Identifier::parse(raw_identifier) {
            Ok(identifier) => {
                self.identifier = Some(identifier.clone());
                self.phase = Phase::Loading;
                Ok(LoadTicket {
                    generation: self.generation,
                    identifier,
                })
            }
            Err(err) => {
                self.identifier = None;
                self.phase = Phase::InvalidIdentifier;
                Err(err)
            }
        }
    }

    /// Applies a load result. Returns false when the result was discarded.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<GallerySnapshot, FetchError>,
    ) -> bool {
        if !self.mounted {
            log::debug!(
                "Ignoring {} result for {}: page unmounted",
                self.kind.path_segment(),
                ticket.identifier
            );
            return false;
        }
        if ticket.generation != self.generation {
            log::debug!(
                "Ignoring stale result for {} (generation {} < {})",
                ticket.identifier,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.phase = match result {
            Ok(snapshot) => {
                let window = advance_window(DisplayWindow::empty(), &snapshot, self.page_size);
                Phase::Loaded { snapshot, window }
            }
            Err(err) => {
                log::warn!(
                    "Failed to load {} gallery for {}: {}",
                    self.kind.path_segment(),
                    ticket.identifier,
                    err
                );
                Phase::Failed(err)
            }
        };
        true
    }

    /// Reveals the next page. Returns true if the window grew.
    ///
    /// No-op until a snapshot has been applied.
    pub fn near_end(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        match &mut self.phase {
            Phase::Loaded { snapshot, window } => {
                let next = advance_window(*window, snapshot, self.page_size);
                let grew = next.len() > window.len();
                *window = next;
                grew
            }
            _ => false,
        }
    }

    /// Current rendering state.
    #[must_use]
    pub fn view(&self) -> GalleryView {
        match &self.phase {
            Phase::Idle | Phase::Loading => GalleryView::Loading,
            Phase::InvalidIdentifier => GalleryView::InvalidIdentifier,
            Phase::Failed(err) => GalleryView::Failed(err.clone()),
            Phase::Loaded { snapshot, .. } if snapshot.is_empty() => GalleryView::Empty,
            Phase::Loaded { snapshot, window } => GalleryView::Populated {
                total_count: snapshot.total_count(),
                window_len: window.len(),
                has_more: !window.is_saturated(snapshot),
            },
        }
    }

    /// The applied snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&GallerySnapshot> {
        match &self.phase {
            Phase::Loaded { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn window(&self) -> DisplayWindow {
        match &self.phase {
            Phase::Loaded { window, .. } => *window,
            _ => DisplayWindow::empty(),
        }
    }

    /// Items currently rendered.
    #[must_use]
    pub fn visible_items(&self) -> &[GalleryItem] {
        match &self.phase {
            Phase::Loaded { snapshot, window } => window.items(snapshot),
            _ => &[],
        }
    }

    /// Marks the page as gone. Results arriving later are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Marks the page as shown again after [`unmount`](Self::unmount).
    ///
    /// Loads started before the unmount stay stale.
    pub fn remount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            self.generation += 1;
        }
    }
}
