//! Pagination types
//!
//! Configuration, per-page results, and the terminal outcome of a fetch.

use crate::decode::{ItemsLocation, MissingItems, PageItems};
use crate::error::{Error, FailureKind, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Configuration for page-number pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number
    pub start_page: u32,
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Page size value
    pub page_size: u32,
    /// Maximum number of page requests (`None` = no ceiling)
    pub max_pages: Option<u32>,
    /// Where the items live in each page body
    pub items: ItemsLocation,
    /// Policy for a body without an item collection
    pub on_missing: MissingItems,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            start_page: 1,
            page_size_param: "per_page".to_string(),
            page_size: 100,
            max_pages: Some(10),
            items: ItemsLocation::TopLevel,
            on_missing: MissingItems::Stop,
        }
    }
}

impl PaginationConfig {
    /// Create a config with default parameter names
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page ceiling (`None` removes it)
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set where items are found
    #[must_use]
    pub fn with_items(mut self, items: ItemsLocation) -> Self {
        self.items = items;
        self
    }

    /// Set the missing-collection policy
    #[must_use]
    pub fn with_on_missing(mut self, policy: MissingItems) -> Self {
        self.on_missing = policy;
        self
    }

    /// Override the query parameter names
    #[must_use]
    pub fn with_param_names(
        mut self,
        page_param: impl Into<String>,
        page_size_param: impl Into<String>,
    ) -> Self {
        self.page_param = page_param.into();
        self.page_size_param = page_size_param.into();
        self
    }
}

/// Terminal status of a paginated fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// No ceiling was set and the server ran out of items
    Complete,
    /// A page came back empty before the ceiling
    StoppedEmpty,
    /// The page ceiling was reached
    StoppedLimit,
    /// A request failed; items gathered before it are kept
    Failed(FailureKind),
}

impl FetchStatus {
    /// Check if the fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Failure kind, if any
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Failed(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::StoppedEmpty => f.write_str("stopped-empty"),
            Self::StoppedLimit => f.write_str("stopped-limit"),
            Self::Failed(kind) => write!(f, "failed({kind})"),
        }
    }
}

/// One successfully retrieved page
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Page number that was requested
    pub page: u32,
    /// Items found in the body
    pub items: PageItems,
}

/// Tracks pagination progress during one fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Next page number to request
    pub page: u32,
    /// Page requests issued so far
    pub requests: u32,
    /// Total items accumulated so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create state starting at a page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Check the ceiling before issuing another request
    pub fn limit_reached(&self, max_pages: Option<u32>) -> bool {
        max_pages.is_some_and(|max| self.requests >= max)
    }

    /// Record a request being issued
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Advance to the next page; `false` if the counter cannot advance
    pub fn next_page(&mut self) -> bool {
        match self.page.checked_add(1) {
            Some(next) => {
                self.page = next;
                true
            }
            None => false,
        }
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: usize) {
        self.total_fetched += count as u64;
    }
}

/// Result of a paginated fetch
///
/// Always carries the items gathered so far, even when the fetch failed.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Items from every successful page, in page order
    pub items: Vec<Value>,
    /// Terminal status
    pub status: FetchStatus,
    /// Number of page requests issued
    pub requests: u32,
    /// The error that ended the fetch, when it failed
    pub error: Option<Error>,
}

impl FetchOutcome {
    pub(crate) fn stopped(items: Vec<Value>, status: FetchStatus, requests: u32) -> Self {
        Self {
            items,
            status,
            requests,
            error: None,
        }
    }

    pub(crate) fn failed(items: Vec<Value>, error: Error, requests: u32) -> Self {
        Self {
            items,
            status: FetchStatus::Failed(error.kind()),
            requests,
            error: Some(error),
        }
    }

    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items were accumulated
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if the fetch failed
    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    /// Deserialize the accumulated items into a typed model
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(Error::from))
            .collect()
    }

    /// Split into items and, if the fetch failed, the error that ended it
    pub fn into_parts(self) -> (Vec<Value>, Option<Error>) {
        (self.items, self.error)
    }
}
