//! Epic endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::{EpicFilter, MockGroup, MockState};
use crate::{Epic, EpicOrderBy, EpicState, SortOrder, MAX_PER_PAGE};

const DEFAULT_PER_PAGE: u32 = 20;

/// Query parameters for listing epics.
#[derive(Debug, Default, Deserialize)]
pub struct ListEpicsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub id: Option<u64>,
    pub author_id: Option<u64>,
    /// Comma-separated label names.
    pub labels: Option<String>,
    pub order_by: Option<EpicOrderBy>,
    pub sort: Option<SortOrder>,
    pub search: Option<String>,
    pub state: Option<EpicState>,
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

/// Check the `PRIVATE-TOKEN` header when the state requires one.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = state.required_token.as_deref() else {
        return Ok(());
    };
    let sent = headers.get("private-token").and_then(|v| v.to_str().ok());
    if sent == Some(required) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "401 Unauthorized"))
    }
}

fn resolve_group<'a>(state: &'a MockState, raw: &str) -> Result<&'a MockGroup, Response> {
    // URL-decode the group path
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    state
        .find_group(&decoded)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "404 Group Not Found"))
}

fn pagination_headers(page: u32, per_page: u32, total: usize) -> HeaderMap {
    let total_pages = total.div_ceil(per_page as usize).max(1);
    let page_usize = page as usize;

    let next = if page_usize < total_pages {
        (page + 1).to_string()
    } else {
        String::new()
    };
    let prev = if page > 1 {
        (page - 1).to_string()
    } else {
        String::new()
    };

    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("x-page", page.to_string()),
        ("x-per-page", per_page.to_string()),
        ("x-total", total.to_string()),
        ("x-total-pages", total_pages.to_string()),
        ("x-next-page", next),
        ("x-prev-page", prev),
    ] {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }
    headers
}

/// GET /groups/{id}/epics
pub async fn list_epics(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(group): Path<String>,
    Query(query): Query<ListEpicsQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;

    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let group = match resolve_group(&state, &group) {
        Ok(g) => g,
        Err(resp) => return resp,
    };

    let filter = EpicFilter {
        id: query.id,
        author_id: query.author_id,
        labels: query
            .labels
            .as_deref()
            .map(|l| l.split(',').map(str::trim).filter(|l| !l.is_empty()).collect())
            .unwrap_or_default(),
        search: query.search.as_deref(),
        state: query.state,
    };

    let mut epics = state.list_epics(group.id, &filter);

    let order_by = query.order_by.unwrap_or(EpicOrderBy::CreatedAt);
    epics.sort_by_key(|e| match order_by {
        EpicOrderBy::CreatedAt => e.created_at,
        EpicOrderBy::UpdatedAt => e.updated_at,
    });
    if query.sort.unwrap_or(SortOrder::Desc) == SortOrder::Desc {
        epics.reverse();
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let total = epics.len();

    // Apply pagination
    let start = ((page - 1) as usize).saturating_mul(per_page as usize);
    let items: Vec<Epic> = epics
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect();

    (
        StatusCode::OK,
        pagination_headers(page, per_page, total),
        Json(items),
    )
        .into_response()
}

/// GET /groups/{id}/epics/{iid}
pub async fn get_epic(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((group, iid)): Path<(String, u64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;

    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let group = match resolve_group(&state, &group) {
        Ok(g) => g,
        Err(resp) => return resp,
    };

    match state.get_epic(group.id, iid) {
        Some(epic) => (StatusCode::OK, Json(epic.clone())).into_response(),
        None => error(StatusCode::NOT_FOUND, "404 Not found"),
    }
}
