//! Award classification rules
//!
//! Two independent axes are derived from a fetched product page: the award
//! type (adventure loop, adventure pin, rank emblem patch) and the den the
//! award belongs to. Both are ordered first-match rule lists over free text.
//!
//! Type matching consults the title first and only falls back to the full
//! page text when the title is silent; den matching never looks at page text
//! at all. Search pages carry den names in navigation and footer chrome, so
//! anything beyond the title is too noisy for den detection.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Physical award category of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    /// Adventure loop (belt loop)
    Loop,
    /// Adventure pin
    Pin,
    /// Rank emblem patch
    RankPatch,
    /// Anything the type rules did not match
    Other,
}

impl ProductType {
    /// All type variants, in folder-planning order
    pub const ALL: [ProductType; 4] = [
        ProductType::Loop,
        ProductType::Pin,
        ProductType::RankPatch,
        ProductType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Loop => "loop",
            ProductType::Pin => "pin",
            ProductType::RankPatch => "rank_patch",
            ProductType::Other => "other",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cub Scout den a product belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Den {
    Lion,
    Tiger,
    Wolf,
    Bear,
    Webelos,
    ArrowOfLight,
    /// No den word found in the title
    Unknown,
}

impl Den {
    /// All den variants, in folder-planning order
    pub const ALL: [Den; 7] = [
        Den::Lion,
        Den::Tiger,
        Den::Wolf,
        Den::Bear,
        Den::Webelos,
        Den::ArrowOfLight,
        Den::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Den::Lion => "lion",
            Den::Tiger => "tiger",
            Den::Wolf => "wolf",
            Den::Bear => "bear",
            Den::Webelos => "webelos",
            Den::ArrowOfLight => "arrow_of_light",
            Den::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Den {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Den detection patterns, checked in order against the lowercased title.
///
/// "Arrow of Light" (both spellings) must come before the single-word den
/// names: an Arrow of Light title can mention another den word, and bundle
/// or comparison titles can carry several.
static DEN_PATTERNS: LazyLock<Vec<(Regex, Den)>> = LazyLock::new(|| {
    [
        (r"\barrow of light\b", Den::ArrowOfLight),
        (r"\baol\b", Den::ArrowOfLight),
        (r"\bwebelos\b", Den::Webelos),
        (r"\bbear\b", Den::Bear),
        (r"\bwolf\b", Den::Wolf),
        (r"\btiger\b", Den::Tiger),
        (r"\blion\b", Den::Lion),
    ]
    .into_iter()
    .map(|(pattern, den)| {
        let re = Regex::new(pattern).expect("hardcoded regex pattern is valid");
        (re, den)
    })
    .collect()
});

/// Runs the type predicates against one lowercased text block
fn match_type(text: &str) -> Option<ProductType> {
    if text.contains("adventure loop") {
        return Some(ProductType::Loop);
    }
    if text.contains("adventure pin") {
        return Some(ProductType::Pin);
    }
    if text.contains("rank emblem") || (text.contains("rank") && text.contains("emblem")) {
        return Some(ProductType::RankPatch);
    }
    None
}

/// Classifies the award type from the product title, then the page text
///
/// The title takes strict priority: page chrome (navigation, footers) names
/// other award categories and corrupts classification when searched first.
pub fn classify_type(title: &str, page_text: &str) -> ProductType {
    let title = title.to_lowercase();
    if let Some(found) = match_type(&title) {
        return found;
    }

    let page_text = page_text.to_lowercase();
    match_type(&page_text).unwrap_or(ProductType::Other)
}

/// Classifies the den strictly from the product title
pub fn classify_den(title: &str) -> Den {
    let title = title.to_lowercase();

    for (pattern, den) in DEN_PATTERNS.iter() {
        if pattern.is_match(&title) {
            return *den;
        }
    }

    Den::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_title() {
        assert_eq!(classify_type("Wolf Adventure Loop", ""), ProductType::Loop);
        assert_eq!(
            classify_type("Webelos Adventure Pin", ""),
            ProductType::Pin
        );
        assert_eq!(
            classify_type("Bear Rank Emblem Patch", ""),
            ProductType::RankPatch
        );
    }

    #[test]
    fn test_type_matches_any_casing() {
        assert_eq!(classify_type("WOLF ADVENTURE LOOP", ""), ProductType::Loop);
        assert_eq!(classify_type("wolf adventure loop", ""), ProductType::Loop);
        assert_eq!(classify_type("Wolf ADVENTURE Loop", ""), ProductType::Loop);
    }

    #[test]
    fn test_title_overrides_page_text() {
        // Page chrome mentioning pins must not flip a loop title
        assert_eq!(
            classify_type("Wolf Adventure Loop", "shop all adventure pin deals"),
            ProductType::Loop
        );
    }

    #[test]
    fn test_type_falls_back_to_page_text() {
        assert_eq!(
            classify_type("Wolf Award", "This adventure loop is worn on the belt."),
            ProductType::Loop
        );
    }

    #[test]
    fn test_split_rank_and_emblem_words() {
        assert_eq!(
            classify_type("Lion Rank Patch Emblem", ""),
            ProductType::RankPatch
        );
    }

    #[test]
    fn test_type_other_when_nothing_matches() {
        assert_eq!(
            classify_type("Scout Handbook", "the official handbook"),
            ProductType::Other
        );
    }

    #[test]
    fn test_den_from_title() {
        assert_eq!(classify_den("Wolf Adventure Loop"), Den::Wolf);
        assert_eq!(classify_den("Lion Rank Emblem"), Den::Lion);
        assert_eq!(classify_den("Tiger Den Flag"), Den::Tiger);
        assert_eq!(classify_den("Bear Claws Adventure Loop"), Den::Bear);
        assert_eq!(classify_den("Webelos Colors"), Den::Webelos);
    }

    #[test]
    fn test_arrow_of_light_beats_other_den_words() {
        assert_eq!(
            classify_den("Arrow of Light vs Bear Comparison Chart"),
            Den::ArrowOfLight
        );
        assert_eq!(classify_den("AOL Wolf Bundle"), Den::ArrowOfLight);
    }

    #[test]
    fn test_den_requires_word_boundary() {
        // "lionheart" must not read as the lion den
        assert_eq!(classify_den("Lionheart Trail Map"), Den::Unknown);
        assert_eq!(classify_den("Werewolf Costume"), Den::Unknown);
    }

    #[test]
    fn test_den_unknown_when_no_match() {
        assert_eq!(classify_den("Adventure Loop Display Stand"), Den::Unknown);
        assert_eq!(classify_den(""), Den::Unknown);
    }
}
