//! Mock server state management.
//!
//! Provides the in-memory data store for the mock GitLab API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Epic, EpicState};

/// A group known to the mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGroup {
    /// Numeric group ID.
    pub id: u64,
    /// Full namespace path (e.g., "acme/platform").
    pub full_path: String,
}

/// Filters the list handler applies, mirroring GitLab semantics.
#[derive(Debug, Default, Clone)]
pub struct EpicFilter<'a> {
    pub id: Option<u64>,
    pub author_id: Option<u64>,
    pub labels: Vec<&'a str>,
    pub search: Option<&'a str>,
    pub state: Option<EpicState>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Groups indexed by numeric ID.
    pub groups: BTreeMap<u64, MockGroup>,

    /// Epics indexed by group ID, in insertion order.
    pub epics: BTreeMap<u64, Vec<Epic>>,

    /// Optional authentication token. If set, requests must send it as
    /// `PRIVATE-TOKEN`.
    pub required_token: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a group to the state.
    pub fn with_group(mut self, id: u64, full_path: &str) -> Self {
        self.groups.insert(
            id,
            MockGroup {
                id,
                full_path: full_path.to_string(),
            },
        );
        self
    }

    /// Add an epic to the state, under its `group_id`.
    pub fn with_epic(mut self, epic: Epic) -> Self {
        self.epics.entry(epic.group_id).or_default().push(epic);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Resolve a group by numeric ID or full path.
    pub fn find_group(&self, id_or_path: &str) -> Option<&MockGroup> {
        match id_or_path.parse::<u64>() {
            Ok(id) => self.groups.get(&id),
            Err(_) => self
                .groups
                .values()
                .find(|g| g.full_path.eq_ignore_ascii_case(id_or_path)),
        }
    }

    /// Get an epic by group ID and IID.
    pub fn get_epic(&self, group_id: u64, iid: u64) -> Option<&Epic> {
        self.epics
            .get(&group_id)
            .and_then(|epics| epics.iter().find(|e| e.iid == iid))
    }

    /// List the epics of a group that match `filter`.
    pub fn list_epics(&self, group_id: u64, filter: &EpicFilter<'_>) -> Vec<&Epic> {
        let Some(epics) = self.epics.get(&group_id) else {
            return vec![];
        };

        epics
            .iter()
            .filter(|e| filter.id.map_or(true, |id| e.id == id))
            .filter(|e| {
                filter
                    .author_id
                    .map_or(true, |id| e.author.as_ref().is_some_and(|a| a.id == id))
            })
            .filter(|e| filter.labels.iter().all(|l| e.has_label(l)))
            .filter(|e| match filter.state {
                None | Some(EpicState::All) => true,
                Some(EpicState::Opened) => e.state == "opened",
                Some(EpicState::Closed) => e.state == "closed",
            })
            .filter(|e| {
                filter.search.map_or(true, |term| {
                    let term = term.to_lowercase();
                    e.title.to_lowercase().contains(&term)
                        || e.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&term))
                })
            })
            .collect()
    }
}
