// SPDX-License-Identifier: MPL-2.0
//! Download-intent tracking. Best effort: failures are logged, never
//! returned.

use super::ApiClient;
use crate::application::account::attendee_token;
use crate::application::port::SessionStore;
use crate::domain::gallery::Identifier;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DownloadIntent<'a> {
    event_slug: &'a str,
    file_name: &'a str,
}

/// Outcome of a tracking attempt, for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Recorded,
    /// No credential was stored; nothing was sent.
    SkippedNoToken,
    Failed,
}

impl ApiClient {
    /// Records that the attendee is about to download `file_name`.
    pub async fn track_download_intent(
        &self,
        store: &impl SessionStore,
        identifier: &Identifier,
        file_name: &str,
    ) -> TrackOutcome {
        let Ok(token) = attendee_token(store, Some(identifier.as_str())) else {
            log::debug!("Not tracking download of {file_name}: no token");
            return TrackOutcome::SkippedNoToken;
        };

        let url = match self.endpoint(&["admin", "metrics", "download"]) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("Failed to record download metric: {err}");
                return TrackOutcome::Failed;
            }
        };

        let result = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&DownloadIntent {
                event_slug: identifier.as_str(),
                file_name,
            })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                log::info!("Recorded download metric for {file_name}");
                TrackOutcome::Recorded
            }
            Ok(response) => {
                log::warn!(
                    "Failed to record download metric for {file_name}: HTTP status {}",
                    response.status()
                );
                TrackOutcome::Failed
            }
            Err(err) => {
                log::warn!("Failed to record download metric for {file_name}: {err}");
                TrackOutcome::Failed
            }
        }
    }
}
