//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{EpicOrderBy, EpicState, GroupId, ListGroupEpicsOptions, ListOptions, SortOrder};

/// Parameters for the `get` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetParams {
    /// Group ID (number) or full path (string).
    pub group: GroupId,
    /// Epic IID within the group.
    pub iid: u64,
}

/// Parameters for the `list` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Group ID (number) or full path (string).
    pub group: GroupId,
    /// Page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,
    /// Number of items per page (max 100).
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Only the epic with this ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Only epics created by this user ID.
    #[serde(default)]
    pub author_id: Option<u64>,
    /// Only epics carrying all of these labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Field to order by.
    #[serde(default)]
    pub order_by: Option<EpicOrderBy>,
    /// Sort direction.
    #[serde(default)]
    pub sort: Option<SortOrder>,
    /// Search in title and description.
    #[serde(default)]
    pub search: Option<String>,
    /// Epic state: opened, closed or all.
    #[serde(default)]
    pub state: Option<EpicState>,
}

impl ListParams {
    /// Convert into request options, applying page defaults.
    pub fn into_options(self, default_per_page: u32, max_per_page: u32) -> ListGroupEpicsOptions {
        ListGroupEpicsOptions {
            list: ListOptions {
                page: Some(self.page.unwrap_or(1)),
                per_page: Some(self.per_page.unwrap_or(default_per_page).min(max_per_page)),
            },
            id: self.id,
            author_id: self.author_id,
            labels: self.labels,
            order_by: self.order_by,
            sort: self.sort,
            search: self.search,
            state: self.state,
        }
    }
}
