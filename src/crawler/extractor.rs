//! HTML extractor producing page records
//!
//! This module turns a fetched page into a [`PageRecord`]:
//! - Page title
//! - Links (resolved to absolute URLs)
//! - Email addresses and phone numbers (pattern scan of the raw HTML)
//! - Forms and their inputs
//! - `<meta>` name/content pairs
//!
//! Extraction never fails. Malformed HTML degrades to whatever html5ever can
//! recover, and an empty body gives an empty record.

use crate::crawler::record::{FormRecord, InputRecord, LinkRecord, PageRecord};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone pattern is valid")
});

/// Extracts a page record from HTML, stamped with the current time
///
/// # Example
///
/// ```
/// use site_harvester::crawler::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let source = Url::parse("https://example.com/").unwrap();
/// let record = extract(html, &source);
/// assert_eq!(record.title, Some("Test".to_string()));
/// assert_eq!(record.links[0].url, "https://example.com/page");
/// ```
pub fn extract(html: &str, source_url: &Url) -> PageRecord {
    extract_with_timestamp(html, source_url, Utc::now())
}

/// Extracts a page record from HTML with an explicit timestamp
pub fn extract_with_timestamp(html: &str, source_url: &Url, timestamp: DateTime<Utc>) -> PageRecord {
    let mut record = PageRecord::empty(source_url.as_str(), timestamp);
    if html.trim().is_empty() {
        return record;
    }

    let document = Html::parse_document(html);

    record.title = extract_title(&document);
    record.links = extract_links(&document, source_url);
    record.emails = extract_emails(html);
    record.phones = extract_phones(html);
    record.forms = extract_forms(&document);
    record.metadata = extract_metadata(&document);

    record
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every anchor with a non-empty href
fn extract_links(document: &Html, base_url: &Url) -> Vec<LinkRecord> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if href.is_empty() {
                continue;
            }

            match base_url.join(href) {
                Ok(absolute_url) => links.push(LinkRecord {
                    text: element.text().collect::<String>().trim().to_string(),
                    url: absolute_url.to_string(),
                }),
                Err(e) => {
                    tracing::debug!("Dropping unresolvable href {:?} on {}: {}", href, base_url, e);
                }
            }
        }
    }

    links
}

/// Scans raw HTML for email addresses
pub fn extract_emails(html: &str) -> BTreeSet<String> {
    EMAIL_PATTERN
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scans raw HTML for phone numbers
pub fn extract_phones(html: &str) -> BTreeSet<String> {
    PHONE_PATTERN
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extracts forms with their inputs in document order
fn extract_forms(document: &Html) -> Vec<FormRecord> {
    let (Ok(form_selector), Ok(input_selector)) =
        (Selector::parse("form"), Selector::parse("input"))
    else {
        return Vec::new();
    };

    document
        .select(&form_selector)
        .map(|form| FormRecord {
            action: attr(&form, "action"),
            method: attr(&form, "method"),
            inputs: form
                .select(&input_selector)
                .map(|input| InputRecord {
                    name: attr(&input, "name"),
                    input_type: attr(&input, "type"),
                    id: attr(&input, "id"),
                })
                .collect(),
        })
        .collect()
}

/// Extracts `<meta>` entries; later duplicates overwrite earlier ones
fn extract_metadata(document: &Html) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    if let Ok(meta_selector) = Selector::parse("meta") {
        for meta in document.select(&meta_selector) {
            let element = meta.value();
            let name = element
                .attr("name")
                .or_else(|| element.attr("property"))
                .unwrap_or("");
            let content = element.attr("content").unwrap_or("");

            if !name.is_empty() && !content.is_empty() {
                metadata.insert(name.to_string(), content.to_string());
            }
        }
    }

    metadata
}

fn attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(String::from)
}
