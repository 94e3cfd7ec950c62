//! Filesystem layout planning
//!
//! Downloaded images land in a taxonomy of `<type root>/<den>` directories
//! under the configured output root, with a flat mirror directory holding a
//! copy of every image for convenient browsing. Filenames are derived
//! deterministically from the SKU and a slugified title.

use crate::classify::{Den, ProductType};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Directory holding a copy of every downloaded image
pub const FLAT_DIR: &str = "_all_flat";

/// Maximum slug length, in characters
const MAX_SLUG_LEN: usize = 140;

/// Fallback slug when a title reduces to nothing
const EMPTY_SLUG: &str = "item";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("hardcoded regex pattern is valid"));

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("hardcoded regex pattern is valid"));

/// Planned destination for one product image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Directory the image belongs in, relative to the output root
    pub folder: PathBuf,

    /// Image file name, `"<sku> - <slug>.jpg"`
    pub filename: String,
}

/// Normalizes free text into a filesystem-safe hyphenated token
///
/// Characters outside word characters, whitespace, and hyphens are stripped;
/// runs of whitespace, underscores, and hyphens collapse into a single
/// hyphen; the result is lowercased and capped at 140 characters. A title
/// that reduces to nothing yields `"item"`.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
///
/// # Example
///
/// ```
/// use den_harvest::layout::slugify;
///
/// assert_eq!(slugify("Wolf Adventure Loop"), "wolf-adventure-loop");
/// ```
pub fn slugify(text: &str) -> String {
    let stripped = NON_SLUG_CHARS.replace_all(text, "");
    let trimmed = stripped.trim();
    let collapsed = SEPARATOR_RUNS.replace_all(trimmed, "-");

    if collapsed.is_empty() {
        return EMPTY_SLUG.to_string();
    }

    collapsed.to_lowercase().chars().take(MAX_SLUG_LEN).collect()
}

/// Maps an award type and den to a directory relative to the output root
///
/// Total over every (type, den) pair: unclassified products land in
/// `rank_patches/unknown` regardless of den.
pub fn folder_for(ptype: ProductType, den: Den) -> PathBuf {
    match ptype {
        ProductType::Loop => Path::new("loops").join(den.as_str()),
        ProductType::Pin => Path::new("pins").join(den.as_str()),
        ProductType::RankPatch => Path::new("rank_patches").join(den.as_str()),
        ProductType::Other => Path::new("rank_patches").join("unknown"),
    }
}

/// Plans the destination folder and filename for one product
pub fn plan(ptype: ProductType, den: Den, sku: &str, title: &str) -> Destination {
    Destination {
        folder: folder_for(ptype, den),
        filename: format!("{} - {}.jpg", sku, slugify(title)),
    }
}

/// Eagerly creates the full output tree under `root`
///
/// Every known (type, den) leaf is created up front, whether or not any
/// product lands there, plus the flat mirror directory.
pub fn ensure_folders(root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root.join(FLAT_DIR))?;

    for type_root in ["loops", "pins", "rank_patches"] {
        for den in Den::ALL {
            std::fs::create_dir_all(root.join(type_root).join(den.as_str()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_title() {
        assert_eq!(slugify("Wolf Adventure Loop"), "wolf-adventure-loop");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(
            slugify("Bear Claws! (Adventure Loop)"),
            "bear-claws-adventure-loop"
        );
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("a  _  -  b"), "a-b");
        assert_eq!(slugify("a___b"), "a-b");
    }

    #[test]
    fn test_slugify_empty_falls_back_to_item() {
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("!!!???"), "item");
    }

    #[test]
    fn test_slugify_caps_length() {
        let long = "a ".repeat(200);
        assert_eq!(slugify(&long).chars().count(), 140);
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let inputs = [
            "Wolf Adventure Loop",
            "Bear Claws! (Adventure Loop)",
            "a  _  -  b",
            "",
            "Tiger: Sky's the Limit",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_folder_planning_is_total() {
        for ptype in ProductType::ALL {
            for den in Den::ALL {
                let dest = plan(ptype, den, "123456", "Some Award");
                assert!(!dest.folder.as_os_str().is_empty());
                assert!(!dest.filename.is_empty());
            }
        }
    }

    #[test]
    fn test_folder_mapping() {
        assert_eq!(
            folder_for(ProductType::Loop, Den::Wolf),
            Path::new("loops").join("wolf")
        );
        assert_eq!(
            folder_for(ProductType::Pin, Den::Webelos),
            Path::new("pins").join("webelos")
        );
        assert_eq!(
            folder_for(ProductType::RankPatch, Den::ArrowOfLight),
            Path::new("rank_patches").join("arrow_of_light")
        );
    }

    #[test]
    fn test_other_type_ignores_den() {
        for den in Den::ALL {
            assert_eq!(
                folder_for(ProductType::Other, den),
                Path::new("rank_patches").join("unknown")
            );
        }
    }

    #[test]
    fn test_filename_format() {
        let dest = plan(
            ProductType::Loop,
            Den::Wolf,
            "643221",
            "Wolf Adventure Loop",
        );
        assert_eq!(dest.filename, "643221 - wolf-adventure-loop.jpg");
    }

    #[test]
    fn test_ensure_folders_creates_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        ensure_folders(dir.path()).unwrap();

        assert!(dir.path().join(FLAT_DIR).is_dir());
        for type_root in ["loops", "pins", "rank_patches"] {
            for den in Den::ALL {
                assert!(
                    dir.path().join(type_root).join(den.as_str()).is_dir(),
                    "missing {}/{}",
                    type_root,
                    den
                );
            }
        }
    }
}
