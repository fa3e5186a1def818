//! List trait for fetching collections of group-scoped resources.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::GitlabClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// List/filter resources below a parent, one page per call.
///
/// Every GitLab list endpoint follows the same contract: resolve the parent
/// into a path, send the options as the query string, decode a JSON array.
/// Implementors only describe the path and the option type; the request
/// itself is issued by the provided [`List::list`].
///
/// # Example
///
/// ```ignore
/// use glapi::{Epic, GitlabClient, List, ListGroupEpicsOptions};
///
/// let client = GitlabClient::from_env()?;
/// let (epics, response) =
///     Epic::list(&client, &"acme".into(), &ListGroupEpicsOptions::default()).await?;
/// println!("{} epics, next page: {:?}", epics.len(), response.page_info.next_page);
/// ```
#[async_trait]
pub trait List: DeserializeOwned + Send {
    /// Identifier of the parent the collection lives under.
    type Parent: Send + Sync + std::fmt::Debug;

    /// Query parameters for filtering and pagination.
    type Options: Serialize + Default + Send + Sync + std::fmt::Debug;

    /// Resource path relative to the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be resolved to a path segment.
    fn path(parent: &Self::Parent) -> Result<String>;

    /// Fetch one page of resources matching `options`.
    ///
    /// Results keep the server's ordering. On error no items are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent is invalid, the request cannot be
    /// built, or the transport fails.
    #[tracing::instrument(skip(client))]
    async fn list(
        client: &GitlabClient,
        parent: &Self::Parent,
        options: &Self::Options,
    ) -> Result<(Vec<Self>, ApiResponse)> {
        let path = Self::path(parent)?;
        let request = client.new_request(Method::GET, &path, Some(options))?;
        client.execute(request).await
    }
}
