//! Structured extraction results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything harvested from one successfully fetched page
///
/// Immutable once built; appended once to the result store. Field names are
/// the ones written to the exported JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The URL the page was fetched from
    pub url: String,

    /// When the page was extracted
    pub timestamp: DateTime<Utc>,

    /// Text of the first `<title>`, if any
    pub title: Option<String>,

    /// Every anchor with an href, resolved against `url`
    pub links: Vec<LinkRecord>,

    /// Distinct email addresses found anywhere in the raw HTML
    pub emails: BTreeSet<String>,

    /// Distinct phone numbers found anywhere in the raw HTML
    pub phones: BTreeSet<String>,

    /// Form definitions in document order
    pub forms: Vec<FormRecord>,

    /// `<meta>` name (or property) to content
    pub metadata: BTreeMap<String, String>,
}

impl PageRecord {
    /// A record with no extracted content
    pub fn empty(url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            timestamp,
            title: None,
            links: Vec::new(),
            emails: BTreeSet::new(),
            phones: BTreeSet::new(),
            forms: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// An anchor found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Trimmed text content of the anchor, possibly empty
    pub text: String,

    /// Absolute URL
    pub url: String,
}

/// A `<form>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub action: Option<String>,
    pub method: Option<String>,
    pub inputs: Vec<InputRecord>,
}

/// An `<input>` inside a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub id: Option<String>,
}
