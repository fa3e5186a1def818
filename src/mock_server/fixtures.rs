//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use crate::{Epic, EpicAuthor};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A default scenario with common test data.
pub struct DefaultScenario {
    /// `(id, full_path)` pairs.
    pub groups: Vec<(u64, String)>,
    pub epics: Vec<Epic>,
}

impl Fixtures {
    /// Create an author.
    pub fn author(id: u64, username: &str) -> EpicAuthor {
        EpicAuthor {
            id,
            username: username.to_string(),
            name: username.to_string(),
            state: "active".to_string(),
            avatar_url: None,
            web_url: format!("https://gitlab.example.com/{username}"),
        }
    }

    /// Create an epic with the fields list filters look at.
    ///
    /// IDs are derived from group and IID; `created_at` grows with the IID
    /// and `updated_at` shrinks with it, so the two orderings differ.
    pub fn epic(group_id: u64, iid: u64, title: &str, state: &str, labels: &[&str]) -> Epic {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let step = i64::try_from(iid).unwrap_or(0);
        let created_at = base + Duration::days(step);
        let updated_at = base + Duration::days(100 - step);

        Epic {
            id: group_id * 1000 + iid,
            iid,
            group_id,
            parent_id: None,
            title: title.to_string(),
            description: Some(format!("Tracking epic for {}", title.to_lowercase())),
            state: state.to_string(),
            web_url: format!("https://gitlab.example.com/groups/{group_id}/-/epics/{iid}"),
            author: Some(Self::author(1, "root")),
            start_date: None,
            start_date_is_fixed: false,
            start_date_fixed: None,
            start_date_from_milestones: None,
            end_date: None,
            due_date: None,
            due_date_is_fixed: false,
            due_date_fixed: None,
            due_date_from_milestones: None,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
            closed_at: (state == "closed").then_some(updated_at),
            labels: labels.iter().map(ToString::to_string).collect(),
            upvotes: 0,
            downvotes: 0,
        }
    }

    /// Create an epic with a fixed due date.
    pub fn scheduled_epic(group_id: u64, iid: u64, title: &str, due: NaiveDate) -> Epic {
        let mut epic = Self::epic(group_id, iid, title, "opened", &[]);
        epic.due_date = Some(due);
        epic.due_date_fixed = Some(due);
        epic.due_date_is_fixed = true;
        epic.end_date = Some(due);
        epic
    }

    /// Default scenario: two groups, a handful of epics with mixed state,
    /// labels and authors.
    pub fn default_scenario() -> DefaultScenario {
        let mut authored = Self::epic(1, 3, "Search revamp", "opened", &["search", "backend"]);
        authored.author = Some(Self::author(42, "jdoe"));

        let due = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default();

        DefaultScenario {
            groups: vec![(1, "acme".to_string()), (2, "acme/platform".to_string())],
            epics: vec![
                Self::epic(1, 1, "Onboarding flow", "opened", &["ux"]),
                Self::epic(1, 2, "Billing migration", "closed", &["backend"]),
                authored,
                Self::scheduled_epic(1, 4, "Q2 release", due),
                Self::epic(2, 1, "Kubernetes upgrade", "opened", &["infra"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epic_fixture_orderings_differ() {
        let first = Fixtures::epic(1, 1, "a", "opened", &[]);
        let second = Fixtures::epic(1, 2, "b", "opened", &[]);
        assert!(first.created_at < second.created_at);
        assert!(first.updated_at > second.updated_at);
    }

    #[test]
    fn test_closed_fixture_has_closed_at() {
        let epic = Fixtures::epic(1, 1, "a", "closed", &["x"]);
        assert!(epic.closed_at.is_some());
        assert_eq!(epic.labels, vec!["x"]);
    }
}
