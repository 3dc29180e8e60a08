// SPDX-License-Identifier: MPL-2.0
//! Navigation targets.
//!
//! Every route that carries an event identifier keeps the user inside the
//! same event when they are sent elsewhere (after login, on expiry, ...).

use crate::domain::error::AuthError;
use std::fmt;

/// A screen the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Event login screen.
    Login(String),
    /// Account registration for an event.
    Register(String),
    /// Selfie capture and submission.
    Selfie(String),
    /// Face-matched search results.
    SearchResult(String),
    /// General photo gallery.
    GeneralGallery(String),
    /// Video gallery.
    VideoGallery(String),
    /// Login screen without event context.
    GlobalLogin,
}

impl Route {
    /// Login route for the event, or the global login without one.
    #[must_use]
    pub fn login_for(identifier: Option<&str>) -> Self {
        match identifier {
            Some(id) if !id.is_empty() => Route::Login(id.to_string()),
            _ => Route::GlobalLogin,
        }
    }

    /// Where to send the user after an auth failure.
    #[must_use]
    pub fn for_auth_error(err: &AuthError) -> Self {
        Self::login_for(err.identifier())
    }

    /// Path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Login(id) => format!("/login/{id}"),
            Route::Register(id) => format!("/register/{id}"),
            Route::Selfie(id) => format!("/{id}/selfie"),
            Route::SearchResult(id) => format!("/result/{id}"),
            Route::GeneralGallery(id) => format!("/{id}/gerais"),
            Route::VideoGallery(id) => format!("/{id}/videos"),
            Route::GlobalLogin => "/login".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
