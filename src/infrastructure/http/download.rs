// SPDX-License-Identifier: MPL-2.0
//! Streaming media downloads.

use super::{transport_error, ApiClient};
use crate::domain::error::FetchError;
use crate::domain::gallery::{GalleryItem, GalleryKind};
use crate::error::Result;
use std::path::{Path, PathBuf};

impl ApiClient {
    /// Downloads `item` into `dir`, named after its key.
    ///
    /// The name comes from [`GalleryItem::file_name`], so it never leaves
    /// `dir`. The body is streamed into `<name>.part` and renamed once
    /// complete; a failed transfer leaves nothing behind. Returns the
    /// written path and its size in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`](crate::error::Error::Fetch) when the
    /// request fails and [`Error::Io`](crate::error::Error::Io) when the
    /// file cannot be written.
    pub async fn download_item(
        &self,
        item: &GalleryItem,
        kind: GalleryKind,
        dir: &Path,
    ) -> Result<(PathBuf, u64)> {
        let response = self
            .http()
            .get(item.url())
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if !response.status().is_success() {
            return Err(FetchError::status(response.status().as_u16()).into());
        }

        std::fs::create_dir_all(dir)?;
        let path = dir.join(item.file_name(kind));
        let partial = partial_path(&path);

        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(cleanup) = std::fs::remove_file(&partial) {
                    log::debug!("Could not remove {}: {cleanup}", partial.display());
                }
                return Err(err);
            }
        };
        std::fs::rename(&partial, &path)?;

        log::info!("Downloaded {} ({written} bytes)", path.display());
        Ok((path, written))
    }
}

/// Sibling path the body is streamed into before the final rename.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

async fn write_body(response: reqwest::Response, partial: &Path) -> Result<u64> {
    use futures_util::StreamExt;

    let mut file = std::fs::File::create(partial)?;
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| transport_error(&e))?;
        std::io::Write::write_all(&mut file, &chunk)?;
        written += chunk.len() as u64;
    }
    file.sync_all()?;
    Ok(written)
}
