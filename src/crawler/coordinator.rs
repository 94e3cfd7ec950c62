//! Harvest coordination
//!
//! Drives the full pipeline: queries → link collection → extraction →
//! classification → download → manifest row. Each link moves through
//! pending → extracted → (skipped | downloaded) → recorded; a link missing
//! its SKU or image is skipped without a manifest row, and a link whose
//! image already exists on disk skips the network fetch but is still
//! recorded.

use crate::classify::{classify_den, classify_type};
use crate::config::Config;
use crate::crawler::collector::collect_links;
use crate::crawler::downloader::download_image;
use crate::crawler::extractor::{extract_product, ProductPage};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::layout::{self, FLAT_DIR};
use crate::manifest::{ManifestRow, ManifestWriter, MANIFEST_FILE};
use crate::Result;
use std::collections::HashSet;
use std::path::Path;
use tokio::time::sleep;

/// Counters reported at the end of a harvest run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Unique product links discovered across all queries
    pub links: usize,

    /// Manifest rows written
    pub recorded: usize,

    /// Images actually fetched this run
    pub downloaded: usize,

    /// Links skipped for missing SKU or image
    pub skipped: usize,
}

/// Runs a complete harvest
///
/// Collects product links for every configured query (deduplicated across
/// queries, first occurrence keeping its position), then processes each
/// unique link in order. Fetch exhaustion and download failures abort the
/// run; pages missing a SKU or image are logged and skipped.
pub async fn run_harvest(config: &Config) -> Result<RunSummary> {
    let client = build_http_client(config)?;
    let root = Path::new(&config.output.root_dir);

    layout::ensure_folders(root)?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut links: Vec<String> = Vec::new();

    for query in &config.queries {
        tracing::info!(query = %query.text, "collecting product links");
        let found = collect_links(&client, config, &query.text).await?;
        for url in found {
            if seen.insert(url.clone()) {
                links.push(url);
            }
        }
    }

    tracing::info!(links = links.len(), "collected unique product links");

    let mut manifest = ManifestWriter::create(&root.join(MANIFEST_FILE))?;
    let mut summary = RunSummary {
        links: links.len(),
        ..RunSummary::default()
    };

    for (index, url) in links.iter().enumerate() {
        let position = index + 1;

        let body = fetch_page(&client, url, &config.harvester).await?;
        let ProductPage {
            title,
            sku,
            image_url,
            page_text,
        } = extract_product(&body, url);

        let (Some(sku), Some(image_url)) = (sku, image_url) else {
            tracing::warn!(
                "[{}/{}] SKIP {} (missing SKU or image)",
                position,
                summary.links,
                url
            );
            summary.skipped += 1;
            continue;
        };

        let ptype = classify_type(&title, &page_text);
        let den = classify_den(&title);

        let destination = layout::plan(ptype, den, &sku, &title);
        let folder = root.join(&destination.folder);
        let target = folder.join(&destination.filename);

        if !target.exists() {
            download_image(&client, &image_url, &target).await?;
            std::fs::copy(&target, root.join(FLAT_DIR).join(&destination.filename))?;

            tracing::info!(
                "[{}/{}] OK {} -> {}/{}",
                position,
                summary.links,
                sku,
                ptype,
                den
            );
            summary.downloaded += 1;

            sleep(config.harvester.download_delay()).await;
        } else {
            tracing::debug!(
                "[{}/{}] already present: {}",
                position,
                summary.links,
                destination.filename
            );
        }

        manifest.append(&ManifestRow {
            sku,
            title,
            product_type: ptype.as_str().to_string(),
            den: den.as_str().to_string(),
            url: url.clone(),
            image: image_url,
            filename: destination.filename,
            folder: folder.to_string_lossy().into_owned(),
        })?;
        summary.recorded += 1;
    }

    manifest.flush()?;

    Ok(summary)
}
