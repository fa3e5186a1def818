//! Mock GitLab API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the GitLab
//! epics API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server filters, sorts and paginates
//! its data the way GitLab does, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use glapi::mock_server::MockServer;
//! use glapi::{GitlabClient, ListGroupEpicsOptions};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = GitlabClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let (epics, _) = client
//!         .epics()
//!         .list_group_epics("acme", &ListGroupEpicsOptions::default())
//!         .await
//!         .unwrap();
//!     assert!(!epics.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{EpicFilter, MockGroup, MockState};
