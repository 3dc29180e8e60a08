// SPDX-License-Identifier: MPL-2.0
//! Session store port definition.
//!
//! Persisted session data (credentials, cached search results) is read and
//! written only through [`SessionStore`], never through ambient global state.
//! An in-memory adapter backs tests; a file adapter backs the CLI.

use std::fmt;

/// Well-known keys of the session store.
pub mod keys {
    /// Attendee bearer credential.
    pub const USER_TOKEN: &str = "user_token";
    /// Alternate name some flows use for the attendee credential.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Identifier of the logged-in attendee.
    pub const USER_ID: &str = "user_id";
    /// Raw JSON of the last selfie search.
    pub const SEARCH_RESULT: &str = "search_result";
    /// Administrator credential.
    pub const ADMIN_TOKEN: &str = "admin_token";
    /// Photographer credential.
    pub const PHOTOGRAPHER_TOKEN: &str = "photographer_token";
    /// Event the attendee browsed last.
    pub const CURRENT_EVENT_SLUG: &str = "current_event_slug";
}

/// Errors raised by session store adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing file could not be read or written.
    Io(String),
    /// The backing data could not be encoded.
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {msg}"),
            StoreError::Encode(msg) => write!(f, "Encoding error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for crate::error::Error {
    fn from(err: StoreError) -> Self {
        crate::error::Error::Store(err.to_string())
    }
}

/// Key/value store for session data.
///
/// Methods take `&self`: adapters use interior mutability so one store can
/// be shared by every page. Writes are last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the removal could not be persisted.
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        (**self).clear(key)
    }
}
