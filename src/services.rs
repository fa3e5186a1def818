//! Service accessors that borrow a [`GitlabClient`].
//!
//! A service groups the calls of one API area behind a method-style surface
//! (`client.epics().list_group_epics(..)`) while the work itself stays in the
//! `Get`/`List` implementations of the model types.

use crate::client::GitlabClient;
use crate::error::Result;
use crate::id::GroupId;
use crate::models::{Epic, ListGroupEpicsOptions};
use crate::response::ApiResponse;
use crate::traits::{Get, List};

/// Accessor for the group epics endpoints.
///
/// # Example
///
/// ```no_run
/// use glapi::{GitlabClient, ListGroupEpicsOptions};
///
/// # async fn example() -> glapi::Result<()> {
/// let client = GitlabClient::from_env()?;
/// let (epics, response) = client
///     .epics()
///     .list_group_epics("gitlab-org", &ListGroupEpicsOptions::default())
///     .await?;
/// println!("{} epics (page {:?})", epics.len(), response.page_info.page);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EpicsService<'a> {
    client: &'a GitlabClient,
}

impl<'a> EpicsService<'a> {
    /// Create a service borrowing `client`.
    pub fn new(client: &'a GitlabClient) -> Self {
        Self { client }
    }

    /// List one page of epics for a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group identifier is invalid, the request
    /// cannot be built, or the transport fails.
    pub async fn list_group_epics(
        &self,
        group: impl Into<GroupId>,
        options: &ListGroupEpicsOptions,
    ) -> Result<(Vec<Epic>, ApiResponse)> {
        Epic::list(self.client, &group.into(), options).await
    }

    /// Get a single epic by its IID within a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the epic does not exist or the request fails.
    pub async fn get_group_epic(&self, group: impl Into<GroupId>, iid: u64) -> Result<Epic> {
        Epic::get(self.client, (group.into(), iid)).await
    }
}
