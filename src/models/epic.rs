//! Epic model and trait implementations.
//!
//! Epics group issues that share a theme across projects and milestones
//! within a GitLab group.

use std::result::Result as StdResult;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};
use serde_with::formats::CommaSeparator;
use serde_with::{serde_as, StringWithSeparator};

use crate::client::GitlabClient;
use crate::error::Result;
use crate::id::GroupId;
use crate::pagination::ListOptions;
use crate::traits::{Get, List};

/// A GitLab epic.
///
/// Date-only fields use `YYYY-MM-DD`; timestamps are RFC 3339. A date that
/// GitLab reports as `null` is `None` and is written back as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    /// Global epic ID.
    pub id: u64,

    /// Epic number within its group.
    pub iid: u64,

    /// ID of the owning group.
    pub group_id: u64,

    /// ID of the parent epic, if nested.
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// The epic title.
    pub title: String,

    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,

    /// State (`opened` or `closed`).
    #[serde(default)]
    pub state: String,

    /// Link to the epic in the GitLab UI.
    #[serde(default)]
    pub web_url: String,

    /// The user who created the epic.
    #[serde(default)]
    pub author: Option<EpicAuthor>,

    /// Effective start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Whether the start date is set manually rather than inherited.
    #[serde(default)]
    pub start_date_is_fixed: bool,

    /// Manually set start date.
    #[serde(default)]
    pub start_date_fixed: Option<NaiveDate>,

    /// Start date inherited from milestones.
    #[serde(default, alias = "start_date_from_milestone")]
    pub start_date_from_milestones: Option<NaiveDate>,

    /// Effective end date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Effective due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Whether the due date is set manually rather than inherited.
    #[serde(default)]
    pub due_date_is_fixed: bool,

    /// Manually set due date.
    #[serde(default)]
    pub due_date_fixed: Option<NaiveDate>,

    /// Due date inherited from milestones.
    #[serde(default, alias = "due_date_from_milestone")]
    pub due_date_from_milestones: Option<NaiveDate>,

    /// When the epic was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the epic was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the epic was closed.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    /// Labels, in the order GitLab returns them.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Upvote count.
    #[serde(default)]
    pub upvotes: u32,

    /// Downvote count.
    #[serde(default)]
    pub downvotes: u32,
}

/// The author of an epic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicAuthor {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: String,
}

impl Epic {
    /// Check if the epic is open.
    pub fn is_open(&self) -> bool {
        self.state == "opened"
    }

    /// Check if the epic carries a label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Username of the author, if known.
    pub fn author_username(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.username.as_str())
    }
}

/// Epic state filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum EpicState {
    /// Open epics only.
    Opened,
    /// Closed epics only.
    Closed,
    /// Both open and closed epics.
    All,
}

/// Field to order epics by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum EpicOrderBy {
    CreatedAt,
    UpdatedAt,
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for listing the epics of a group.
///
/// Every filter is optional and absent filters produce no query pair, so
/// `author_id: Some(0)` is sent while `None` is not. Labels are sent as a
/// single comma-joined value; blank label names are dropped, and the pair is
/// omitted when nothing is left.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListGroupEpicsOptions {
    /// Page number and size.
    #[serde(flatten)]
    pub list: ListOptions,

    /// Only the epic with this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Only epics created by this user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,

    /// Only epics carrying all of these labels.
    #[serde(
        default,
        deserialize_with = "serde_with::As::<StringWithSeparator::<CommaSeparator, String>>::deserialize",
        serialize_with = "serialize_labels",
        skip_serializing_if = "has_no_labels"
    )]
    pub labels: Vec<String>,

    /// Field to order by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<EpicOrderBy>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,

    /// Search in title and description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Only epics in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EpicState>,
}

impl ListGroupEpicsOptions {
    /// Options requesting one page with default filters.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            list: ListOptions::for_page(page, per_page),
            ..Default::default()
        }
    }
}

fn has_no_labels(labels: &[String]) -> bool {
    labels.iter().all(|l| l.trim().is_empty())
}

fn serialize_labels<S: Serializer>(
    labels: &[String],
    serializer: S,
) -> StdResult<S::Ok, S::Error> {
    let joined = labels
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

#[async_trait]
impl List for Epic {
    type Parent = GroupId;
    type Options = ListGroupEpicsOptions;

    fn path(group: &GroupId) -> Result<String> {
        Ok(format!("groups/{}/epics", group.path_segment()?))
    }
}

#[async_trait]
impl Get for Epic {
    type Id = (GroupId, u64); // (group, epic IID)

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitlabClient, id: Self::Id) -> Result<Self> {
        let (group, iid) = id;
        let path = format!("{}/{iid}", <Self as List>::path(&group)?);
        let request = client.new_request::<()>(Method::GET, &path, None)?;
        let (epic, _) = client.execute(request).await?;
        Ok(epic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "id": 30,
            "iid": 5,
            "group_id": 7,
            "parent_id": null,
            "title": "Ea cupiditate dolores ut vero consequatur quasi veniam voluptatem et non.",
            "description": "Molestias dolorem eos vitae expedita impedit necessitatibus quo voluptatum.",
            "state": "opened",
            "web_url": "http://gitlab.example.com/groups/test/-/epics/5",
            "author": {
                "id": 7,
                "name": "Pamella Huel",
                "username": "arnita",
                "state": "active",
                "avatar_url": null,
                "web_url": "http://gitlab.example.com/arnita"
            },
            "start_date": null,
            "start_date_is_fixed": false,
            "start_date_fixed": null,
            "start_date_from_milestones": null,
            "end_date": "2018-07-31",
            "due_date": "2018-07-31",
            "due_date_is_fixed": false,
            "due_date_fixed": null,
            "due_date_from_milestones": "2018-07-31",
            "created_at": "2018-07-17T13:36:22.770Z",
            "updated_at": "2018-07-18T12:22:05.239Z",
            "closed_at": null,
            "labels": ["backend", "q3"],
            "upvotes": 4,
            "downvotes": 0
        })
    }

    #[test]
    fn test_epic_deserialize() {
        let epic: Epic = serde_json::from_value(sample_json()).expect("Failed to deserialize epic");

        assert_eq!(epic.id, 30);
        assert_eq!(epic.iid, 5);
        assert_eq!(epic.group_id, 7);
        assert!(epic.title.starts_with("Ea cupiditate"));
        assert!(epic.is_open());
        assert_eq!(epic.author_username(), Some("arnita"));
        assert_eq!(epic.due_date, NaiveDate::from_ymd_opt(2018, 7, 31));
        assert_eq!(epic.end_date, NaiveDate::from_ymd_opt(2018, 7, 31));
        assert_eq!(epic.labels, vec!["backend", "q3"]);
        assert!(epic.has_label("q3"));
        assert!(epic.created_at.is_some());
    }

    #[test]
    fn test_null_date_stays_absent_on_reencode() {
        let epic: Epic = serde_json::from_value(sample_json()).unwrap();
        assert!(epic.start_date.is_none());

        let reencoded = serde_json::to_value(&epic).unwrap();
        assert!(reencoded["start_date"].is_null());
        assert_eq!(reencoded["due_date"], "2018-07-31");

        let again: Epic = serde_json::from_value(reencoded).unwrap();
        assert_eq!(again, epic);
    }

    #[test]
    fn test_epic_deserialize_minimal() {
        let epic: Epic = serde_json::from_str(
            r#"{"id": 1, "iid": 1, "group_id": 2, "title": "Roadmap"}"#,
        )
        .unwrap();

        assert!(epic.author.is_none());
        assert!(epic.labels.is_empty());
        assert!(epic.due_date.is_none());
        assert!(!epic.start_date_is_fixed);
    }

    #[test]
    fn test_legacy_milestone_keys_are_accepted() {
        let epic: Epic = serde_json::from_str(
            r#"{"id": 1, "iid": 1, "group_id": 2, "title": "t",
                "start_date_from_milestone": "2024-01-02"}"#,
        )
        .unwrap();
        assert_eq!(epic.start_date_from_milestones, NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn test_path_for_numeric_and_named_groups() {
        assert_eq!(Epic::path(&GroupId::from(42)).unwrap(), "groups/42/epics");
        assert_eq!(
            Epic::path(&GroupId::from("acme/platform")).unwrap(),
            "groups/acme%2Fplatform/epics"
        );
        assert!(Epic::path(&GroupId::from("")).is_err());
    }

    #[test]
    fn test_options_serialize_to_snake_case_json() {
        let opts = ListGroupEpicsOptions {
            author_id: Some(0),
            labels: vec!["a".into(), "b".into()],
            order_by: Some(EpicOrderBy::UpdatedAt),
            state: Some(EpicState::Opened),
            ..ListGroupEpicsOptions::for_page(2, 50)
        };
        let json = serde_json::to_value(&opts).unwrap();

        assert_eq!(json["page"], 2);
        assert_eq!(json["per_page"], 50);
        assert_eq!(json["author_id"], 0);
        assert_eq!(json["labels"], "a,b");
        assert_eq!(json["order_by"], "updated_at");
        assert_eq!(json["state"], "opened");
        assert!(json.get("sort").is_none());
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_blank_labels_are_dropped() {
        let only_blank = ListGroupEpicsOptions {
            labels: vec![String::new(), " ".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&only_blank).unwrap();
        assert!(json.get("labels").is_none());

        let mixed = ListGroupEpicsOptions {
            labels: vec!["a".into(), String::new(), "b".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&mixed).unwrap();
        assert_eq!(json["labels"], "a,b");
    }

    #[test]
    fn test_id_filter_is_sent_when_set() {
        let opts = ListGroupEpicsOptions {
            id: Some(17),
            ..Default::default()
        };
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["id"], 17);
        assert!(serde_json::to_value(ListGroupEpicsOptions::default())
            .unwrap()
            .get("id")
            .is_none());
    }

    #[test]
    fn test_options_deserialize_comma_labels() {
        let opts: ListGroupEpicsOptions =
            serde_json::from_str(r#"{"labels": "ux,backend", "sort": "asc"}"#).unwrap();
        assert_eq!(opts.labels, vec!["ux", "backend"]);
        assert_eq!(opts.sort, Some(SortOrder::Asc));
    }
}
