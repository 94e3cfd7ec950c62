//! CSV catalog manifest
//!
//! The manifest is the single output index of a harvest run: one row per
//! successfully processed product, in processing order. Skipped links never
//! get a row; they only surface in the logs.

use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Manifest file name under the output root
pub const MANIFEST_FILE: &str = "catalog.csv";

/// One manifest row, in fixed column order
#[derive(Debug, Clone, Serialize)]
pub struct ManifestRow {
    pub sku: String,
    pub title: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub den: String,
    pub url: String,
    pub image: String,
    pub filename: String,
    pub folder: String,
}

/// Append-only writer for the catalog manifest
///
/// The header row is emitted with the first record. The file is truncated on
/// creation: a rerun rewrites the manifest from scratch, so unchanged input
/// produces byte-identical output.
pub struct ManifestWriter {
    writer: csv::Writer<File>,
}

impl ManifestWriter {
    /// Creates (or truncates) the manifest at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(ManifestWriter { writer })
    }

    /// Appends one row
    pub fn append(&mut self, row: &ManifestRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    /// Flushes buffered rows to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ManifestRow {
        ManifestRow {
            sku: "643221".to_string(),
            title: "Wolf Adventure Loop".to_string(),
            product_type: "loop".to_string(),
            den: "wolf".to_string(),
            url: "https://shop.example/wolf-adventure-loop-643221.html".to_string(),
            image: "https://shop.example/media/catalog/product/wolf.jpg".to_string(),
            filename: "643221 - wolf-adventure-loop.jpg".to_string(),
            folder: "scout_awards_media/loops/wolf".to_string(),
        }
    }

    #[test]
    fn test_header_and_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let mut manifest = ManifestWriter::create(&path).unwrap();
        manifest.append(&sample_row()).unwrap();
        manifest.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sku,title,type,den,url,image,filename,folder"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("643221,Wolf Adventure Loop,loop,wolf,"));
    }

    #[test]
    fn test_quotes_titles_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let mut row = sample_row();
        row.title = "Wolf, Tiger, and Bear Bundle".to_string();

        let mut manifest = ManifestWriter::create(&path).unwrap();
        manifest.append(&row).unwrap();
        manifest.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Wolf, Tiger, and Bear Bundle\""));
    }

    #[test]
    fn test_create_truncates_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let mut manifest = ManifestWriter::create(&path).unwrap();
        manifest.append(&sample_row()).unwrap();
        manifest.append(&sample_row()).unwrap();
        manifest.flush().unwrap();
        drop(manifest);

        let mut manifest = ManifestWriter::create(&path).unwrap();
        manifest.append(&sample_row()).unwrap();
        manifest.flush().unwrap();
        drop(manifest);

        let content = std::fs::read_to_string(&path).unwrap();
        // Header plus exactly one row
        assert_eq!(content.lines().count(), 2);
    }
}
