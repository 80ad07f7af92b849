//! Pagination types for Cloud Foundry V3 list responses.
//!
//! Every V3 list endpoint answers with the same envelope:
//!
//! ```json
//! {
//!   "pagination": {
//!     "total_results": 3,
//!     "total_pages": 2,
//!     "first": { "href": "https://api.example.org/v3/apps?page=1&per_page=2" },
//!     "last": { "href": "https://api.example.org/v3/apps?page=2&per_page=2" },
//!     "next": { "href": "https://api.example.org/v3/apps?page=2&per_page=2" },
//!     "previous": null
//!   },
//!   "resources": [],
//!   "included": { "spaces": [] }
//! }
//! ```
//!
//! Position in a list is tracked by a [`PageCursor`], which is only ever
//! advanced by reading the `next` link the server hands back.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CfError, Result};

/// Largest page size the V3 API accepts.
pub const MAX_PER_PAGE: u32 = 5000;

/// Position within a paged collection.
///
/// Both values are 1-based. A value of zero is treated as unset, in which
/// case the endpoint's default applies and nothing is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    page: Option<u32>,
    per_page: Option<u32>,
}

impl PageCursor {
    /// Create a cursor for a specific page.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: non_zero(page),
            per_page: non_zero(per_page),
        }
    }

    /// Cursor for the first page with the given page size.
    #[must_use]
    pub fn first_page(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Page number, if set.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Page size, if set.
    pub fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// Derive a cursor from a pagination link such as
    /// `https://api.example.org/v3/apps?page=3&per_page=25`.
    ///
    /// Returns `None` if the URL cannot be parsed or has no usable `page`.
    pub fn from_link(href: &str) -> Option<Self> {
        let url = Url::parse(href).ok()?;

        let mut page = None;
        let mut per_page = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => page = value.parse::<u32>().ok().and_then(non_zero),
                "per_page" => per_page = value.parse::<u32>().ok().and_then(non_zero),
                _ => {}
            }
        }

        Some(Self {
            page: Some(page?),
            per_page,
        })
    }

    /// Query parameters for this cursor, omitting unset values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

fn non_zero(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

/// A link object (`{"href": "..."}`) as used in V3 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
    /// HTTP method, present on action links only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    /// Create a plain link.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
        }
    }
}

/// Pagination block of a list response.
///
/// `total_results` and `total_pages` are informational; whether more pages
/// exist is decided by `next` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of results across all pages.
    #[serde(default)]
    pub total_results: u64,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub first: Option<Link>,
    #[serde(default)]
    pub last: Option<Link>,
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(default)]
    pub previous: Option<Link>,
}

impl Pagination {
    /// Whether the server reports another page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Cursor for the next page.
    ///
    /// A `next` link that cannot be parsed ends pagination: it is logged
    /// and treated as if it were absent.
    pub fn next_cursor(&self) -> Option<PageCursor> {
        let next = self.next.as_ref()?;
        let cursor = PageCursor::from_link(&next.href);
        if cursor.is_none() {
            tracing::warn!(href = %next.href, "Unparseable next page link, stopping pagination");
        }
        cursor
    }

    /// Cursor for the previous page, if there is one.
    pub fn previous_cursor(&self) -> Option<PageCursor> {
        self.previous
            .as_ref()
            .and_then(|link| PageCursor::from_link(&link.href))
    }
}

/// Related resources embedded in a list response, keyed by relation name
/// (e.g. `spaces`, `organizations`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Included(BTreeMap<String, Vec<serde_json::Value>>);

impl Included {
    /// Create an empty set of side-collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `other`'s collections after ours, name by name.
    ///
    /// Entries are concatenated in order, without deduplication.
    pub fn extend(&mut self, other: Included) {
        for (name, items) in other.0 {
            self.0.entry(name).or_default().extend(items);
        }
    }

    /// Add items to a named collection.
    pub fn push(&mut self, name: impl Into<String>, items: Vec<serde_json::Value>) {
        self.0.entry(name.into()).or_default().extend(items);
    }

    /// Raw items of a named collection.
    pub fn raw(&self, name: &str) -> &[serde_json::Value] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Decode a named collection into typed resources.
    ///
    /// A missing collection decodes to an empty list.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        self.raw(name)
            .iter()
            .map(|value| {
                T::deserialize(value).map_err(|e| {
                    CfError::decode(&format!("included.{name}"), value.to_string().as_bytes(), e)
                })
            })
            .collect()
    }

    /// Names of the collections present.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns true if no collection is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned", serialize = "T: Serialize"))]
pub struct ListPage<T> {
    /// Pagination metadata for the whole result set.
    pub pagination: Pagination,
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
    /// Side-collections requested with `include`.
    #[serde(default, skip_serializing_if = "Included::is_empty")]
    pub included: Included,
}

impl<T> ListPage<T> {
    /// Create a page without side-collections.
    #[must_use]
    pub fn new(resources: Vec<T>, pagination: Pagination) -> Self {
        Self {
            pagination,
            resources,
            included: Included::default(),
        }
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ListPage<U> {
        ListPage {
            pagination: self.pagination,
            resources: self.resources.into_iter().map(f).collect(),
            included: self.included,
        }
    }

    /// Whether the server reports another page.
    pub fn has_more(&self) -> bool {
        self.pagination.has_next()
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.resources.iter()
    }
}

impl<T> IntoIterator for ListPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListPage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
