//! Image download
//!
//! Single-attempt binary download, streamed to disk in chunks so memory use
//! stays bounded regardless of image size. The skip-if-exists idempotency
//! check belongs to the caller.

use crate::{HarvestError, Result};
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads an image to `dest`
///
/// No retry at this layer: a transport failure or non-success status is
/// returned as [`HarvestError::Download`] immediately.
pub async fn download_image(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let download_err = |source: reqwest::Error| HarvestError::Download {
        url: url.to_string(),
        source,
    };
    let write_err = |source: std::io::Error| HarvestError::FileWrite {
        path: dest.to_path_buf(),
        source,
    };

    let response = client.get(url).send().await.map_err(download_err)?;
    let mut response = response.error_for_status().map_err(download_err)?;

    let mut file = tokio::fs::File::create(dest).await.map_err(write_err)?;
    while let Some(chunk) = response.chunk().await.map_err(download_err)? {
        file.write_all(&chunk).await.map_err(write_err)?;
    }
    file.flush().await.map_err(write_err)?;

    Ok(())
}
