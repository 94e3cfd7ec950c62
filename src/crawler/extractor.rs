//! Product-page metadata extraction
//!
//! Pulls the title, SKU, and primary image URL out of heterogeneous product
//! HTML. Each field has a fixed priority list of extraction rules; the first
//! rule that produces a value wins and later rules never override it.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Path segment identifying catalog product media
const PRODUCT_MEDIA_SEGMENT: &str = "/media/catalog/product";

/// Visible-text SKU label, e.g. "SKU: 643221"
static SKU_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bSKU:\s*([0-9]{5,10})\b").expect("hardcoded regex pattern is valid")
});

/// Trailing article number in a product URL
static URL_SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d{5,7})\.html$").expect("hardcoded regex pattern is valid"));

/// Everything extracted from one product page
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Product title; empty when the page has neither an h1 nor a title tag
    pub title: String,

    /// Catalog SKU, if any extraction rule matched
    pub sku: Option<String>,

    /// Primary product image URL, if any extraction rule matched
    pub image_url: Option<String>,

    /// Full visible page text, used for type-classification fallback
    pub page_text: String,
}

/// Extracts product metadata from a fetched page
///
/// # Extraction rules, per field (first match wins)
///
/// **Title**: first `<h1>`; else `<title>`; else empty.
///
/// **SKU**: `SKU: <digits>` label in the visible text; else a `sku` field in
/// an embedded JSON-LD object (malformed blocks are skipped); else the
/// trailing article number of the page URL.
///
/// **Image**: `og:image` meta tag; else `twitter:image` meta tag; else the
/// first inline `<img>` whose resolved source lives under the product media
/// path.
pub fn extract_product(html: &str, page_url: &str) -> ProductPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let page_text = document_text(&document);
    let sku = extract_sku(&document, &page_text, page_url);
    let image_url = extract_image(&document, page_url);

    ProductPage {
        title,
        sku,
        image_url,
        page_text,
    }
}

/// Collects an element's text nodes into one space-separated string
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_title(document: &Html) -> String {
    if let Ok(h1_selector) = Selector::parse("h1") {
        if let Some(h1) = document.select(&h1_selector).next() {
            return element_text(h1);
        }
    }

    if let Ok(title_selector) = Selector::parse("title") {
        if let Some(title) = document.select(&title_selector).next() {
            return element_text(title);
        }
    }

    String::new()
}

fn document_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_sku(document: &Html, page_text: &str, page_url: &str) -> Option<String> {
    if let Some(captures) = SKU_LABEL_RE.captures(page_text) {
        return Some(captures[1].to_string());
    }

    if let Some(sku) = sku_from_json_ld(document) {
        return Some(sku);
    }

    URL_SKU_RE
        .captures(page_url)
        .map(|captures| captures[1].to_string())
}

/// Scans embedded JSON-LD blocks for a top-level `sku` field
fn sku_from_json_ld(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let raw: String = script.text().collect();

        // Malformed blocks fall through to the next rule
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        let Some(object) = value.as_object() else {
            continue;
        };

        match object.get("sku") {
            Some(serde_json::Value::String(sku)) => return Some(sku.clone()),
            Some(serde_json::Value::Number(sku)) => return Some(sku.to_string()),
            _ => {}
        }
    }

    None
}

fn extract_image(document: &Html, page_url: &str) -> Option<String> {
    if let Ok(og_selector) = Selector::parse(r#"meta[property="og:image"]"#) {
        if let Some(content) = document
            .select(&og_selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .filter(|content| !content.is_empty())
        {
            return Some(content.to_string());
        }
    }

    if let Ok(twitter_selector) = Selector::parse(r#"meta[name="twitter:image"]"#) {
        if let Some(content) = document
            .select(&twitter_selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .filter(|content| !content.is_empty())
        {
            return Some(content.to_string());
        }
    }

    // Inline <img> fallback: first source under the product media path
    let base = Url::parse(page_url).ok()?;
    let img_selector = Selector::parse("img[src]").ok()?;
    for img in document.select(&img_selector) {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        let Ok(resolved) = base.join(src) else {
            continue;
        };
        if resolved.as_str().contains(PRODUCT_MEDIA_SEGMENT) {
            return Some(resolved.to_string());
        }
    }

    None
}
