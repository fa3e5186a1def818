//! Pagination utilities for GitLab API requests and responses.

use reqwest::header::HeaderMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum page size accepted by GitLab.
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters shared by every paginated list endpoint.
///
/// Resource-specific options flatten this struct into their own query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListOptions {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListOptions {
    /// Create pagination params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// Pagination metadata GitLab returns in `X-*` response headers.
///
/// Every field is optional: GitLab omits `X-Total` and `X-Total-Pages`
/// for large collections, and the next/previous headers are empty on the
/// last/first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page number.
    pub page: Option<u32>,
    /// Number of items per page.
    pub per_page: Option<u32>,
    /// Total number of items across all pages.
    pub total: Option<u64>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Next page number, if any.
    pub next_page: Option<u32>,
    /// Previous page number, if any.
    pub prev_page: Option<u32>,
}

impl PageInfo {
    /// Read pagination headers from a response.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            page: header_number(headers, "x-page"),
            per_page: header_number(headers, "x-per-page"),
            total: header_number(headers, "x-total"),
            total_pages: header_number(headers, "x-total-pages"),
            next_page: header_number(headers, "x-next-page"),
            prev_page: header_number(headers, "x-prev-page"),
        }
    }

    /// Whether the server reported a following page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}
