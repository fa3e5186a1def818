//! Response envelope returned alongside decoded data.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;

use crate::pagination::PageInfo;

/// Transport-level metadata for one API call.
///
/// Returned next to the decoded body so callers can inspect the status
/// and pagination headers without re-issuing the request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Pagination headers.
    pub page_info: PageInfo,
    /// Value of `X-Request-Id`, if GitLab sent one.
    pub request_id: Option<String>,
}

impl ApiResponse {
    pub(crate) fn from_parts(status: StatusCode, headers: &HeaderMap) -> Self {
        Self {
            status: status.as_u16(),
            page_info: PageInfo::from_headers(headers),
            request_id: headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        }
    }

    /// Whether the server reported a following page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page_info.has_more()
    }
}
