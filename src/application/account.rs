// SPDX-License-Identifier: MPL-2.0
//! Account flows: registration validation, login and search-result
//! persistence, and the auth guard used before protected requests.
//!
//! Network calls live in the infrastructure layer; this module only decides
//! what is stored where and which route comes next.

use crate::app::Route;
use crate::application::port::{keys, SessionStore, StoreError};
use crate::domain::error::{AuthError, ValidationError};
use crate::domain::gallery::{GalleryItem, GallerySnapshot, Identifier};
use serde::{Deserialize, Serialize};

/// Maximum WhatsApp digits (two-digit area code plus nine-digit number).
pub const MAX_PHONE_DIGITS: usize = 11;

/// Gallery item as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub key: String,
    pub url: String,
}

impl From<ItemRecord> for GalleryItem {
    fn from(record: ItemRecord) -> Self {
        GalleryItem::new(record.key, record.url)
    }
}

/// Body of a selfie search response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    /// Archive of every match, when the server prepared one.
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default, rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

impl SearchResult {
    /// Deduplicated snapshot of the matched items.
    #[must_use]
    pub fn into_snapshot(self) -> GallerySnapshot {
        GallerySnapshot::from_feed(self.items.into_iter().map(GalleryItem::from))
    }
}

/// User object inside a login response. Servers send numeric or string ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginUser {
    pub id: serde_json::Value,
}

impl LoginUser {
    #[must_use]
    pub fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

/// Body of a successful registration. The token is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Registration form as typed by the attendee.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub whatsapp: String,
    pub instagram: String,
    pub accepted_lgpd: bool,
}

/// Validated registration payload, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub whatsapp: String,
    pub instagram: String,
    pub accepted_lgpd: bool,
    pub event_slug: String,
}

impl Registration {
    /// Validates the form and builds the request for `identifier`.
    ///
    /// The phone number is reduced to its digits.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking required
    /// fields, then the password confirmation, consent and phone number.
    pub fn validate(&self, identifier: &Identifier) -> Result<RegistrationRequest, ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.accepted_lgpd {
            return Err(ValidationError::ConsentRequired);
        }

        let whatsapp: String = self.whatsapp.chars().filter(char::is_ascii_digit).collect();
        if whatsapp.len() > MAX_PHONE_DIGITS {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(RegistrationRequest {
            name: self.name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            whatsapp,
            instagram: self.instagram.trim().to_string(),
            accepted_lgpd: self.accepted_lgpd,
            event_slug: identifier.as_str().to_string(),
        })
    }
}

/// Returns the credential stored under `key`.
///
/// # Errors
///
/// Returns an [`AuthError`] pointing at the event login when the
/// credential is missing or blank.
pub fn require_token(
    store: &impl SessionStore,
    key: &str,
    identifier: Option<&str>,
) -> Result<String, AuthError> {
    match store.get(key) {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AuthError::missing_token(identifier)),
    }
}

/// Returns the attendee credential: `user_token`, else `access_token`.
///
/// # Errors
///
/// Returns an [`AuthError`] pointing at the event login when neither key
/// holds a credential.
pub fn attendee_token(
    store: &impl SessionStore,
    identifier: Option<&str>,
) -> Result<String, AuthError> {
    require_token(store, keys::USER_TOKEN, identifier)
        .or_else(|_| require_token(store, keys::ACCESS_TOKEN, identifier))
}

/// Body of an attendee comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRequest {
    pub event_slug: String,
    pub user_id: String,
    pub comment: String,
}

/// Builds a comment from the logged-in attendee on `identifier`.
///
/// Returns the credential to send it with alongside the body.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] for a blank comment, checked
/// first, then an [`AuthError`] when the credential or the attendee id is
/// missing.
pub fn comment_request(
    store: &impl SessionStore,
    identifier: &Identifier,
    comment: &str,
) -> crate::error::Result<(String, CommentRequest)> {
    if comment.trim().is_empty() {
        return Err(ValidationError::EmptyField("comment").into());
    }
    let token = attendee_token(store, Some(identifier.as_str()))?;
    let user_id = store
        .get(keys::USER_ID)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AuthError::missing_token(Some(identifier.as_str())))?;

    Ok((
        token,
        CommentRequest {
            event_slug: identifier.as_str().to_string(),
            user_id,
            comment: comment.to_string(),
        },
    ))
}

/// Stores the credentials of a successful login. Next stop: the selfie.
///
/// # Errors
///
/// Returns a [`StoreError`] if the store could not persist them.
pub fn persist_login(
    store: &impl SessionStore,
    identifier: &Identifier,
    response: &LoginResponse,
) -> Result<Route, StoreError> {
    store.set(keys::USER_TOKEN, &response.access_token)?;
    store.set(keys::USER_ID, &response.user.id_string())?;
    store.set(keys::CURRENT_EVENT_SLUG, identifier.as_str())?;
    log::info!("Logged in to {identifier}");
    Ok(Route::Selfie(identifier.as_str().to_string()))
}

/// Stores the token a registration may return.
///
/// With a token the attendee goes straight to the selfie screen, without
/// one to the event login.
///
/// # Errors
///
/// Returns a [`StoreError`] if the store could not persist the token.
pub fn persist_registration(
    store: &impl SessionStore,
    identifier: &Identifier,
    response: &RegistrationResponse,
) -> Result<Route, StoreError> {
    match response.token.as_deref().filter(|token| !token.is_empty()) {
        Some(token) => {
            store.set(keys::USER_TOKEN, token)?;
            Ok(Route::Selfie(identifier.as_str().to_string()))
        }
        None => Ok(Route::Login(identifier.as_str().to_string())),
    }
}

/// Stores the raw body of a search response. Next stop: the results.
///
/// # Errors
///
/// Returns a [`StoreError`] if the store could not persist the body.
pub fn record_search_result(
    store: &impl SessionStore,
    identifier: &Identifier,
    body: &str,
) -> Result<Route, StoreError> {
    store.set(keys::SEARCH_RESULT, body)?;
    Ok(Route::SearchResult(identifier.as_str().to_string()))
}

/// Reads the last search result back as a deduplicated snapshot.
///
/// Missing or unparseable data yields an empty snapshot.
pub fn restore_search_result(store: &impl SessionStore) -> GallerySnapshot {
    let Some(raw) = store.get(keys::SEARCH_RESULT) else {
        log::info!("No stored search result");
        return GallerySnapshot::empty();
    };
    match serde_json::from_str::<SearchResult>(&raw) {
        Ok(result) => result.into_snapshot(),
        Err(err) => {
            log::warn!("Stored search result is unreadable: {err}");
            GallerySnapshot::empty()
        }
    }
}

/// Forgets every credential and cached result.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised while clearing.
pub fn logout(store: &impl SessionStore) -> Result<(), StoreError> {
    for key in [
        keys::USER_TOKEN,
        keys::ACCESS_TOKEN,
        keys::USER_ID,
        keys::SEARCH_RESULT,
        keys::CURRENT_EVENT_SLUG,
    ] {
        store.clear(key)?;
    }
    Ok(())
}
