// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! These errors describe the three failure families a gallery page can meet:
//! a failed retrieval ([`FetchError`]), a missing or rejected credential
//! ([`AuthError`]) and invalid user input ([`ValidationError`]).

use std::fmt;

// =============================================================================
// FetchError
// =============================================================================

/// A gallery or search retrieval that did not produce usable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    /// HTTP status of the response, `None` when no response arrived.
    status: Option<u16>,
    /// Human-readable detail.
    message: String,
}

impl FetchError {
    /// Creates an error for a non-success HTTP status.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: format!("HTTP status {status}"),
        }
    }

    /// Creates an error for a transport failure (DNS, connection, timeout).
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an error for a success response whose body could not be parsed.
    #[must_use]
    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: format!("invalid response body: {}", message.into()),
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// Returns true when the server rejected the request's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }

    /// Returns the error detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) if !self.message.starts_with("HTTP status") => {
                write!(f, "Fetch failed ({status}): {}", self.message)
            }
            _ => write!(f, "Fetch failed: {}", self.message),
        }
    }
}

impl std::error::Error for FetchError {}

// =============================================================================
// AuthError
// =============================================================================

/// Why a protected operation could not proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No credential is stored under the expected key.
    MissingToken,
    /// The server refused the credentials, with its explanation.
    Rejected(String),
}

/// A missing or invalid session credential.
///
/// Carries the event identifier, when known, so callers can send the user
/// back to the login screen of the same event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    failure: AuthFailure,
    identifier: Option<String>,
}

impl AuthError {
    /// No token was found before a protected call.
    #[must_use]
    pub fn missing_token(identifier: Option<&str>) -> Self {
        Self {
            failure: AuthFailure::MissingToken,
            identifier: identifier.map(str::to_string),
        }
    }

    /// The server rejected the credentials.
    #[must_use]
    pub fn rejected(detail: impl Into<String>, identifier: Option<&str>) -> Self {
        Self {
            failure: AuthFailure::Rejected(detail.into()),
            identifier: identifier.map(str::to_string),
        }
    }

    #[must_use]
    pub fn failure(&self) -> &AuthFailure {
        &self.failure
    }

    /// The event the user was browsing, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            AuthFailure::MissingToken => write!(f, "Not logged in"),
            AuthFailure::Rejected(detail) => write!(f, "Authentication rejected: {detail}"),
        }
    }
}

impl std::error::Error for AuthError {}

// =============================================================================
// ValidationError
// =============================================================================

/// Invalid input caught before any request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The event identifier is empty or whitespace.
    EmptyIdentifier,
    /// A required form field is empty.
    EmptyField(&'static str),
    /// Password and confirmation differ.
    PasswordMismatch,
    /// The data-protection consent box was not ticked.
    ConsentRequired,
    /// The phone number has too many digits.
    InvalidPhone,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyIdentifier => write!(f, "Invalid event identifier"),
            ValidationError::EmptyField(field) => write!(f, "Field '{field}' is required"),
            ValidationError::PasswordMismatch => write!(f, "Passwords do not match"),
            ValidationError::ConsentRequired => write!(f, "Consent must be accepted"),
            ValidationError::InvalidPhone => write!(f, "Invalid phone number"),
        }
    }
}

impl std::error::Error for ValidationError {}
