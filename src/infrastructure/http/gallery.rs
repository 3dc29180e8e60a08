// SPDX-License-Identifier: MPL-2.0
//! Gallery feed endpoint: `GET {base}/gallery/{identifier}/{general|videos}`.

use super::{transport_error, ApiClient};
use crate::application::account::ItemRecord;
use crate::application::port::GallerySource;
use crate::domain::error::FetchError;
use crate::domain::gallery::{GalleryItem, GalleryKind, Identifier};

/// Parses a success body as a JSON array of `{key, url}` records.
pub(crate) fn parse_feed(status: u16, body: &[u8]) -> Result<Vec<GalleryItem>, FetchError> {
    let records: Vec<ItemRecord> =
        serde_json::from_slice(body).map_err(|e| FetchError::decode(status, e.to_string()))?;
    Ok(records.into_iter().map(GalleryItem::from).collect())
}

impl GallerySource for ApiClient {
    async fn fetch_items(
        &self,
        identifier: &Identifier,
        kind: GalleryKind,
    ) -> Result<Vec<GalleryItem>, FetchError> {
        let url = self
            .endpoint(&["gallery", identifier.as_str(), kind.path_segment()])
            .map_err(|e| FetchError::transport(e.to_string()))?;
        log::debug!("GET {url}");

        let response = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| transport_error(&e))?;
        parse_feed(status.as_u16(), &body)
    }
}
