//! GitLab Epics API client library.
//!
//! A Rust library for the GitLab epics REST API. Resource operations are
//! traits ([`Get`], [`List`]) that model types implement; the shared
//! [`GitlabClient`] only builds and executes requests.
//!
//! # Quick Start
//!
//! ```no_run
//! use glapi::{EpicState, GitlabClient, ListGroupEpicsOptions};
//!
//! #[tokio::main]
//! async fn main() -> glapi::Result<()> {
//!     // Create client from environment variables
//!     let client = GitlabClient::from_env()?;
//!
//!     // List open epics of a group, 50 per page
//!     let options = ListGroupEpicsOptions {
//!         state: Some(EpicState::Opened),
//!         ..ListGroupEpicsOptions::for_page(1, 50)
//!     };
//!     let (epics, response) = client.epics().list_group_epics("gitlab-org", &options).await?;
//!     println!("Found {} epics, total {:?}", epics.len(), response.page_info.total);
//!
//!     // Get one epic by IID
//!     let epic = client.epics().get_group_epic("gitlab-org", 1).await?;
//!     println!("Epic: {}", epic.title);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`List`] - Fetch one page of a collection below a parent
//! - [`Get`] - Fetch a single resource by ID
//!
//! Each list endpoint is described by its path and option type; the request,
//! status handling and decoding are shared through [`GitlabClient::new_request`]
//! and [`GitlabClient::execute`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `GITLAB_TOKEN` (required) - Access token
//! - `GITLAB_TOKEN_KIND` (optional) - `private` (default), `oauth` or `job`
//! - `GITLAB_URL` (optional) - Base URL (defaults to `https://gitlab.com/api/v4`)

mod client;
mod error;
mod id;
mod models;
mod pagination;
mod response;
mod services;
mod traits;

pub mod cli;
pub mod mcp;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{AuthToken, GitlabClient};
pub use error::{ErrorKind, GitlabError, Result};
pub use id::GroupId;
pub use pagination::{ListOptions, PageInfo, MAX_PER_PAGE};
pub use response::ApiResponse;
pub use services::EpicsService;

// Re-export traits
pub use traits::{Get, List};

// Re-export models
pub use models::{Epic, EpicAuthor, EpicOrderBy, EpicState, ListGroupEpicsOptions, SortOrder};

// Re-export output formatting
pub use output::PrettyPrint;
