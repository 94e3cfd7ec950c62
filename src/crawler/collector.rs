//! Search-result link collection
//!
//! Paginates the catalog search endpoint for one query and accumulates
//! product-page URLs. The search endpoint happily serves empty result pages
//! past the end, so pagination stops as soon as a page contributes nothing
//! new to the accumulated set.

use crate::config::Config;
use crate::crawler::fetcher::fetch_page;
use crate::url::{canonicalize, is_product_url, search_url};
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tokio::time::sleep;
use url::Url;

/// Collects product-page URLs for one search query
///
/// Fetches result pages 1 through `max-search-pages`, scanning every
/// hyperlink on each. Stops early once a page contributes zero new URLs.
/// A politeness delay separates page fetches.
///
/// # Returns
///
/// The accumulated URLs in sorted order, for deterministic downstream
/// processing.
pub async fn collect_links(client: &Client, config: &Config, query_text: &str) -> Result<Vec<String>> {
    let base = Url::parse(&config.catalog.base_url)?;
    let mut found: BTreeSet<String> = BTreeSet::new();

    for page in 1..=config.catalog.max_search_pages {
        let page_url = search_url(&base, query_text, page);
        let body = fetch_page(client, page_url.as_str(), &config.harvester).await?;

        let before = found.len();
        found.extend(scan_product_links(&body, &base));

        // A page with no new links signals the end of the results
        if found.len() == before {
            break;
        }

        sleep(config.harvester.page_delay()).await;
    }

    Ok(found.into_iter().collect())
}

/// Scans one HTML document for product-shaped hyperlink targets
///
/// Every `a[href]` is resolved to canonical absolute form (query string
/// dropped); only URLs matching the product-page shape are kept. The set
/// semantics collapse the same product listed under different facet links.
fn scan_product_links(html: &str, base: &Url) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute) = canonicalize(base, href) else {
            continue;
        };
        if is_product_url(&absolute) {
            links.insert(absolute);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example").unwrap()
    }

    #[test]
    fn test_scan_keeps_only_product_shaped_links() {
        let html = r#"
            <html><body>
                <a href="/wolf-adventure-loop-643221.html">Wolf Loop</a>
                <a href="/cub-scouts">Category</a>
                <a href="/privacy-policy.html">Privacy</a>
            </body></html>
        "#;
        let links = scan_product_links(html, &base());
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://shop.example/wolf-adventure-loop-643221.html"));
    }

    #[test]
    fn test_scan_dedupes_query_string_variants() {
        let html = r#"
            <html><body>
                <a href="/wolf-adventure-loop-643221.html?color=blue">Blue</a>
                <a href="/wolf-adventure-loop-643221.html?size=large">Large</a>
            </body></html>
        "#;
        let links = scan_product_links(html, &base());
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://shop.example/wolf-adventure-loop-643221.html"));
    }

    #[test]
    fn test_scan_resolves_relative_hrefs() {
        let html = r#"<html><body><a href="bear-necessities-620158.html">Bear</a></body></html>"#;
        let links = scan_product_links(html, &base());
        assert!(links.contains("https://shop.example/bear-necessities-620158.html"));
    }

    #[test]
    fn test_scan_returns_sorted_order() {
        let html = r#"
            <html><body>
                <a href="/zebra-award-999999.html">Z</a>
                <a href="/alpha-award-111111.html">A</a>
            </body></html>
        "#;
        let links: Vec<String> = scan_product_links(html, &base()).into_iter().collect();
        assert_eq!(
            links,
            vec![
                "https://shop.example/alpha-award-111111.html".to_string(),
                "https://shop.example/zebra-award-999999.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_scan_empty_page() {
        let links = scan_product_links("<html><body></body></html>", &base());
        assert!(links.is_empty());
    }
}
