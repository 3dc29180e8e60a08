// SPDX-License-Identifier: MPL-2.0
//! Account endpoints: login, registration, selfie search, attendee
//! comments and download password validation.

use super::{error_detail, transport_error, ApiClient};
use crate::app::Route;
use crate::application::account::{
    attendee_token, comment_request, persist_login, persist_registration, record_search_result,
    LoginResponse, Registration, RegistrationResponse, SearchResult,
};
use crate::application::port::SessionStore;
use crate::domain::error::{AuthError, FetchError};
use crate::domain::gallery::Identifier;
use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_LOGIN_ERROR: &str = "Invalid email or password";
const DEFAULT_REGISTER_ERROR: &str = "Registration failed";
const DEFAULT_DOWNLOAD_ERROR: &str = "Invalid password or expired link";
const DEFAULT_COMMENT_ERROR: &str = "Failed to send comment";

#[derive(Debug, Deserialize)]
struct DownloadGrant {
    #[serde(default)]
    download_url: Option<String>,
}

/// MIME type of a selfie, from its extension.
fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

impl ApiClient {
    /// Logs in with email and password and stores the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] carrying the server's `detail` when the
    /// credentials are refused, [`Error::Fetch`] on transport failure.
    pub async fn login(
        &self,
        store: &impl SessionStore,
        identifier: &Identifier,
        email: &str,
        password: &str,
    ) -> Result<Route> {
        let url = self.endpoint(&["auth", "login"])?;
        let response = self
            .http()
            .post(url)
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            let detail = error_detail(&body).unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string());
            log::warn!("Login for {identifier} refused ({status}): {detail}");
            return Err(AuthError::rejected(detail, Some(identifier.as_str())).into());
        }

        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::decode(status.as_u16(), e.to_string()))?;
        Ok(persist_login(store, identifier, &login)?)
    }

    /// Validates and submits a registration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] before any request when the form is
    /// invalid, [`Error::Http`] with the server's `detail` when refused.
    pub async fn register(
        &self,
        store: &impl SessionStore,
        identifier: &Identifier,
        form: &Registration,
    ) -> Result<Route> {
        let request = form.validate(identifier)?;
        let url = self.endpoint(&["users", ""])?;
        let response = self
            .http()
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            let detail = error_detail(&body).unwrap_or_else(|| DEFAULT_REGISTER_ERROR.to_string());
            return Err(Error::Http(detail));
        }

        // Some deployments answer with an empty body.
        let registered: RegistrationResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(persist_registration(store, identifier, &registered)?)
    }

    /// Uploads a selfie and stores the matching items.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when no token is stored or the server
    /// rejects it, [`Error::Io`] if the image cannot be read and
    /// [`Error::Fetch`] for any other failed request.
    pub async fn search_selfie(
        &self,
        store: &impl SessionStore,
        identifier: &Identifier,
        image: &Path,
    ) -> Result<Route> {
        let token = attendee_token(store, Some(identifier.as_str()))?;
        let bytes = tokio::fs::read(image).await?;
        let file_name = image
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("selfie.jpg")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(image))?;

        let url = self.endpoint(&["search", identifier.as_str()])?;
        log::info!("Searching {identifier} with {}", image.display());
        let response = self
            .http()
            .post(url)
            .bearer_auth(token)
            .multipart(Form::new().part("selfie", part))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        if matches!(status.as_u16(), 401 | 403) {
            let detail = error_detail(&body).unwrap_or_else(|| status.to_string());
            return Err(AuthError::rejected(detail, Some(identifier.as_str())).into());
        }
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16()).into());
        }

        let result: SearchResult = serde_json::from_str(&body)
            .map_err(|e| FetchError::decode(status.as_u16(), e.to_string()))?;
        log::info!("Search for {identifier} matched {} items", result.items.len());
        Ok(record_search_result(store, identifier, &body)?)
    }

    /// Sends the logged-in attendee's comment on the event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank comment and
    /// [`Error::Auth`] when no credential or attendee id is stored, both
    /// before any request. A refused comment yields [`Error::Auth`] for
    /// 401/403 and [`Error::Http`] with the server's message otherwise.
    pub async fn post_comment(
        &self,
        store: &impl SessionStore,
        identifier: &Identifier,
        comment: &str,
    ) -> Result<()> {
        let (token, request) = comment_request(store, identifier, comment)?;
        let url = self.endpoint(&["comments"])?;
        let response = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            log::info!("Comment sent for {identifier}");
            return Ok(());
        }

        let body = response.text().await.map_err(|e| transport_error(&e))?;
        let detail = error_detail(&body).unwrap_or_else(|| DEFAULT_COMMENT_ERROR.to_string());
        log::warn!("Comment for {identifier} refused ({status}): {detail}");
        if matches!(status.as_u16(), 401 | 403) {
            return Err(AuthError::rejected(detail, Some(identifier.as_str())).into());
        }
        Err(Error::Http(detail))
    }

    /// Exchanges an event download password for an archive URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] with the server's `detail` when the password
    /// is refused, [`Error::Decode`] when no URL comes back.
    pub async fn validate_download(&self, identifier: &Identifier, password: &str) -> Result<String> {
        let mut url = self.endpoint(&["download", "validate"])?;
        url.query_pairs_mut()
            .append_pair("slug", identifier.as_str())
            .append_pair("password", password);

        let response = self
            .http()
            .post(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;
        if !status.is_success() {
            let detail = error_detail(&body).unwrap_or_else(|| DEFAULT_DOWNLOAD_ERROR.to_string());
            return Err(AuthError::rejected(detail, Some(identifier.as_str())).into());
        }

        serde_json::from_str::<DownloadGrant>(&body)
            .ok()
            .and_then(|grant| grant.download_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Decode("Invalid server response".to_string()))
    }
}
