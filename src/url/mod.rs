//! URL handling for the catalog harvester
//!
//! Product pages on the catalog site share a fixed URL shape: the path ends
//! in a hyphen, a 5-7 digit article number, and `.html`. Everything else a
//! search page links to (category pages, account chrome, footer links) fails
//! that shape and is ignored.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Product-page URL shape: hyphen + 5-7 digits + `.html` suffix
static PRODUCT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-\d{5,7}\.html$").expect("hardcoded regex pattern is valid")
});

/// Returns true if the URL looks like a catalog product page
///
/// # Example
///
/// ```
/// use den_harvest::url::is_product_url;
///
/// assert!(is_product_url("https://shop.example/wolf-adventure-loop-643221.html"));
/// assert!(!is_product_url("https://shop.example/cub-scouts"));
/// ```
pub fn is_product_url(url: &str) -> bool {
    PRODUCT_URL_RE.is_match(url)
}

/// Resolves a hyperlink target to canonical absolute form
///
/// Relative hrefs are resolved against `base`; the query string and fragment
/// are dropped so the same product reached through different search facets
/// dedupes to one entry. Returns None for non-HTTP(S) targets and hrefs that
/// cannot be resolved.
pub fn canonicalize(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(mut absolute) => {
            if absolute.scheme() != "http" && absolute.scheme() != "https" {
                return None;
            }
            absolute.set_query(None);
            absolute.set_fragment(None);
            Some(absolute.to_string())
        }
        Err(_) => None,
    }
}

/// Builds the search-results URL for a query and page number
///
/// The query text is form-urlencoded (spaces become `+`), matching what the
/// site's own search box submits.
pub fn search_url(base: &Url, query: &str, page: u32) -> Url {
    let mut url = base.clone();
    url.set_path("/catalogsearch/result/");
    url.query_pairs_mut()
        .clear()
        .append_pair("q", query)
        .append_pair("p", &page.to_string());
    url
}
