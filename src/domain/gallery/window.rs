// SPDX-License-Identifier: MPL-2.0
//! Incremental display window over a gallery snapshot.
//!
//! The window is the rendered prefix of a snapshot. It grows by one page
//! each time the user nears the end of the list and never shrinks within
//! a session.

use super::types::{GalleryItem, GallerySnapshot};
use crate::domain::session::PageSize;

/// The currently displayed prefix of a [`GallerySnapshot`].
///
/// The window stores only its length; the items are borrowed from the
/// snapshot it was advanced against, so growing it never copies items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayWindow {
    len: usize,
}

impl DisplayWindow {
    /// An empty window (nothing rendered yet).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of items in the window.
    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The windowed items of `snapshot`.
    ///
    /// Clamped to the snapshot length, so a window from another snapshot
    /// never indexes out of bounds.
    #[must_use]
    pub fn items(self, snapshot: &GallerySnapshot) -> &[GalleryItem] {
        let items = snapshot.items();
        &items[..self.len.min(items.len())]
    }

    /// Returns true when the window covers the whole snapshot.
    #[must_use]
    pub fn is_saturated(self, snapshot: &GallerySnapshot) -> bool {
        self.len >= snapshot.total_count()
    }
}

/// Grows `current` by one page, bounded by the snapshot length.
///
/// Once the window covers the whole snapshot the same window is returned.
///
/// # Example
///
/// ```
/// use event_lens::domain::gallery::{advance_window, DisplayWindow, GalleryItem, GallerySnapshot};
/// use event_lens::domain::session::PageSize;
///
/// let snapshot = GallerySnapshot::from_feed([
///     GalleryItem::new("a", "u1"),
///     GalleryItem::new("b", "u2"),
/// ]);
/// let page = PageSize::new(1);
///
/// let first = advance_window(DisplayWindow::empty(), &snapshot, page);
/// assert_eq!(first.len(), 1);
/// let second = advance_window(first, &snapshot, page);
/// assert_eq!(second.len(), 2);
/// assert_eq!(advance_window(second, &snapshot, page), second);
/// ```
#[must_use]
pub fn advance_window(
    current: DisplayWindow,
    snapshot: &GallerySnapshot,
    page_size: PageSize,
) -> DisplayWindow {
    let total = snapshot.total_count();
    if current.len >= total {
        return current;
    }
    DisplayWindow {
        len: current.len.saturating_add(page_size.value()).min(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(count: usize) -> GallerySnapshot {
        GallerySnapshot::from_feed(
            (0..count).map(|i| GalleryItem::new(format!("k{i}"), format!("u{i}"))),
        )
    }

    #[test]
    fn first_advance_reveals_one_page() {
        let snap = snapshot(50);
        let window = advance_window(DisplayWindow::empty(), &snap, PageSize::PHOTOS);
        assert_eq!(window.len(), 24);
        assert_eq!(window.items(&snap)[0].key(), "k0");
    }

    #[test]
    fn window_growth_is_monotonic_and_bounded() {
        let snap = snapshot(50);
        let mut window = DisplayWindow::empty();
        let mut lengths = Vec::new();
        for _ in 0..6 {
            window = advance_window(window, &snap, PageSize::VIDEOS);
            lengths.push(window.len());
        }
        assert_eq!(lengths, vec![16, 32, 48, 50, 50, 50]);
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn saturated_window_is_returned_unchanged() {
        let snap = snapshot(3);
        let full = advance_window(DisplayWindow::empty(), &snap, PageSize::new(10));
        assert!(full.is_saturated(&snap));

        let again = advance_window(full, &snap, PageSize::new(10));
        assert_eq!(again, full);
        assert_eq!(again.items(&snap), full.items(&snap));
    }

    #[test]
    fn empty_snapshot_keeps_empty_window() {
        let snap = GallerySnapshot::empty();
        let window = advance_window(DisplayWindow::empty(), &snap, PageSize::PHOTOS);
        assert!(window.is_empty());
        assert!(window.items(&snap).is_empty());
    }

    #[test]
    fn items_clamp_to_foreign_snapshot() {
        let big = snapshot(30);
        let small = snapshot(5);
        let window = advance_window(DisplayWindow::empty(), &big, PageSize::PHOTOS);
        assert_eq!(window.items(&small).len(), 5);
    }

    #[test]
    fn example_scenario_reveals_items_one_by_one() {
        let snap = GallerySnapshot::from_feed([
            GalleryItem::new("a", "u1"),
            GalleryItem::new("b", "u2"),
            GalleryItem::new("a", "u3"),
        ]);
        let page = PageSize::new(1);

        let first = advance_window(DisplayWindow::empty(), &snap, page);
        assert_eq!(first.items(&snap), &[GalleryItem::new("a", "u3")]);

        let second = advance_window(first, &snap, page);
        assert_eq!(
            second.items(&snap),
            &[GalleryItem::new("a", "u3"), GalleryItem::new("b", "u2")]
        );
    }
}
