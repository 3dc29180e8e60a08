// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the event platform API.
//!
//! [`ApiClient`] wraps one `reqwest` client configured with the request
//! timeout, a bounded redirect policy and the application user agent. The
//! endpoint families live in submodules:
//!
//! - [`gallery`]: gallery feeds (implements [`GallerySource`])
//! - [`account`]: login, registration, selfie search, download validation
//! - [`metrics`]: download-intent tracking
//! - [`download`]: streaming media downloads to disk
//!
//! [`GallerySource`]: crate::application::port::GallerySource

pub mod account;
pub mod download;
pub mod gallery;
pub mod metrics;

use crate::config::{defaults::USER_AGENT, ApiConfig};
use crate::domain::error::FetchError;
use crate::error::{Error, Result};
use reqwest::Url;

/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Client for the platform API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client for `config.base_url`.
    ///
    /// A trailing `/` on the base URL is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unusable base URL and
    /// [`Error::Http`] if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{trimmed}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL '{trimmed}' cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Appends percent-encoded path `segments` to the base URL.
    ///
    /// An empty last segment produces a trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::Config("API base URL cannot carry a path".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Maps a `reqwest` failure without a response to a [`FetchError`].
pub(crate) fn transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::transport(format!("request timed out: {err}"))
    } else {
        FetchError::transport(err.to_string())
    }
}

/// Extracts the server's `detail` message from an error body.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: None,
        })
        .expect("valid client")
    }

    #[test]
    fn endpoint_trims_trailing_slash_of_base() {
        let api = client("https://api.example.com/v1/");
        let url = api.endpoint(&["gallery", "evento-teste", "general"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/gallery/evento-teste/general");
    }

    #[test]
    fn endpoint_percent_encodes_segments() {
        let api = client("http://localhost:8000");
        let url = api.endpoint(&["gallery", "festa junina/2025", "videos"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/gallery/festa%20junina%2F2025/videos"
        );
    }

    #[test]
    fn empty_last_segment_keeps_trailing_slash() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["users", ""]).unwrap().as_str(),
            "http://localhost:8000/users/"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = ApiClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            request_timeout_secs: None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn error_detail_reads_string_or_structure() {
        assert_eq!(
            error_detail(r#"{"detail":"Senha inválida"}"#).as_deref(),
            Some("Senha inválida")
        );
        assert!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#)
            .unwrap()
            .contains("loc"));
        assert_eq!(error_detail("<html>"), None);
        assert_eq!(error_detail(r#"{"detail":null}"#), None);
    }
}
