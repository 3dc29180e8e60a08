// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::{AuthError, FetchError, ValidationError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Http(String),
    Decode(String),
    Store(String),
    Fetch(FetchError),
    Auth(AuthError),
    Validation(ValidationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Store(e) => write!(f, "Session Store Error: {}", e),
            Error::Fetch(e) => write!(f, "{}", e),
            Error::Auth(e) => write!(f, "{}", e),
            Error::Validation(e) => write!(f, "Validation Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// The auth failure behind this error, if any.
    ///
    /// Callers use it to redirect to the login route instead of rendering
    /// an error message.
    #[must_use]
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            Error::Auth(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        Error::Auth(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn fetch_error_is_wrapped() {
        let err: Error = FetchError::status(404).into();
        assert!(matches!(err, Error::Fetch(ref e) if e.status_code() == Some(404)));
        assert_eq!(err.to_string(), "Fetch failed: HTTP status 404");
    }

    #[test]
    fn auth_error_is_exposed_for_redirects() {
        let err: Error = AuthError::missing_token(Some("evento")).into();
        assert_eq!(err.as_auth().and_then(AuthError::identifier), Some("evento"));
        assert!(Error::Io("x".into()).as_auth().is_none());
    }

    #[test]
    fn validation_error_formats_properly() {
        let err: Error = ValidationError::PasswordMismatch.into();
        assert_eq!(err.to_string(), "Validation Error: Passwords do not match");
    }

    #[test]
    fn json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
