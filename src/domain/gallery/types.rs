// SPDX-License-Identifier: MPL-2.0
//! Core gallery types for the domain layer.

use crate::domain::error::ValidationError;
use std::collections::HashMap;
use std::fmt;

/// File name used when a storage key has no usable last segment.
const FALLBACK_PHOTO_NAME: &str = "foto.jpg";
/// Stem used for videos whose key has no usable last segment.
const FALLBACK_VIDEO_STEM: &str = "video";

// =============================================================================
// Identifier
// =============================================================================

/// Event identifier (slug), guaranteed non-empty and trimmed.
///
/// # Example
///
/// ```
/// use event_lens::domain::gallery::Identifier;
///
/// let id = Identifier::parse("  evento-teste ").unwrap();
/// assert_eq!(id.as_str(), "evento-teste");
/// assert!(Identifier::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validates a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for empty or blank input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// GalleryKind
// =============================================================================

/// Which collection of an event is browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GalleryKind {
    /// General event photos.
    #[default]
    General,
    /// Event videos.
    Videos,
}

impl GalleryKind {
    /// Path segment used by the gallery endpoint.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            GalleryKind::General => "general",
            GalleryKind::Videos => "videos",
        }
    }
}

// =============================================================================
// GalleryItem
// =============================================================================

/// One media object: a storage key and the URL it can be retrieved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    key: String,
    url: String,
}

impl GalleryItem {
    #[must_use]
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }

    /// Unique identifier of the item (storage object key).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Retrieval URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// File name to use when saving this item locally.
    ///
    /// Both kinds use the last path segment of the key, so the name is
    /// always a single path component; videos get an `.mp4` extension.
    /// Keys without a usable segment (empty, `.` or `..`) fall back to a
    /// fixed name.
    #[must_use]
    pub fn file_name(&self, kind: GalleryKind) -> String {
        let segment = last_segment(&self.key);
        match kind {
            GalleryKind::General => segment.unwrap_or(FALLBACK_PHOTO_NAME).to_string(),
            GalleryKind::Videos => format!("{}.mp4", segment.unwrap_or(FALLBACK_VIDEO_STEM)),
        }
    }
}

fn last_segment(key: &str) -> Option<&str> {
    key.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|segment| {
            !segment.is_empty()
                && *segment != "."
                && *segment != ".."
                && !segment.contains(':')
                && !segment.chars().any(char::is_control)
        })
}

// =============================================================================
// GallerySnapshot
// =============================================================================

/// Deduplicated result of one successful fetch.
///
/// Keys are unique. The item count is the deduplicated count, never the raw
/// feed length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GallerySnapshot {
    items: Vec<GalleryItem>,
}

impl GallerySnapshot {
    /// Builds a snapshot from a raw feed, deduplicating by key.
    #[must_use]
    pub fn from_feed(feed: impl IntoIterator<Item = GalleryItem>) -> Self {
        Self {
            items: dedupe_by_key(feed),
        }
    }

    /// An empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Looks up an item by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.key == key)
    }
}

/// Deduplicates items by key in O(n).
///
/// A repeated key keeps the position of its first occurrence and the value
/// of its last one, the way a map built by sequential insertion behaves.
#[must_use]
pub fn dedupe_by_key(feed: impl IntoIterator<Item = GalleryItem>) -> Vec<GalleryItem> {
    let feed = feed.into_iter();
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(feed.size_hint().0);
    let mut items: Vec<GalleryItem> = Vec::with_capacity(feed.size_hint().0);

    for item in feed {
        match positions.get(&item.key) {
            Some(&index) => items[index] = item,
            None => {
                positions.insert(item.key.clone(), items.len());
                items.push(item);
            }
        }
    }

    items
}
