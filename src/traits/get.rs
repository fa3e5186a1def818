//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::GitlabClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// Implement this trait for resource types that can be fetched individually.
///
/// # Example
///
/// ```ignore
/// use glapi::{Epic, GitlabClient, Get, GroupId};
///
/// let client = GitlabClient::from_env()?;
/// let epic = Epic::get(&client, (GroupId::from("acme"), 5)).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource.
    type Id: Send;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    async fn get(client: &GitlabClient, id: Self::Id) -> Result<Self>;
}
