//! E2E tests using the mock GitLab server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use glapi::mock_server::{Fixtures, MockServer, MockState};
use glapi::{
    Epic, EpicOrderBy, EpicState, ErrorKind, Get, GitlabClient, List, ListGroupEpicsOptions,
    SortOrder,
};

fn iids(epics: &[Epic]) -> Vec<u64> {
    epics.iter().map(|e| e.iid).collect()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// List Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_defaults_to_newest_first() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let (epics, response) = client
        .epics()
        .list_group_epics(1, &ListGroupEpicsOptions::default())
        .await
        .unwrap();

    assert_eq!(iids(&epics), vec![4, 3, 2, 1]);
    assert_eq!(response.page_info.total, Some(4));
    assert!(!response.has_more());

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_by_nested_group_path() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let (epics, _) = client
        .epics()
        .list_group_epics("acme/platform", &ListGroupEpicsOptions::default())
        .await
        .unwrap();

    assert_eq!(epics.len(), 1);
    assert_eq!(epics[0].title, "Kubernetes upgrade");

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_filters_by_state_and_labels() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let opened = ListGroupEpicsOptions {
        state: Some(EpicState::Opened),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &"acme".into(), &opened).await.unwrap();
    assert_eq!(iids(&epics), vec![4, 3, 1]);

    let backend = ListGroupEpicsOptions {
        labels: vec!["backend".into()],
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &"acme".into(), &backend).await.unwrap();
    assert_eq!(iids(&epics), vec![3, 2]);

    let both = ListGroupEpicsOptions {
        labels: vec!["backend".into(), "search".into()],
        state: Some(EpicState::Opened),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &"acme".into(), &both).await.unwrap();
    assert_eq!(iids(&epics), vec![3]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_filters_by_author_and_search() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let by_author = ListGroupEpicsOptions {
        author_id: Some(42),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &1.into(), &by_author).await.unwrap();
    assert_eq!(iids(&epics), vec![3]);
    assert_eq!(epics[0].author_username(), Some("jdoe"));

    let by_id = ListGroupEpicsOptions {
        id: Some(1003),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &1.into(), &by_id).await.unwrap();
    assert_eq!(iids(&epics), vec![3]);

    let by_search = ListGroupEpicsOptions {
        search: Some("BILLING".into()),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &1.into(), &by_search).await.unwrap();
    assert_eq!(iids(&epics), vec![2]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_respects_order_and_sort() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let created_asc = ListGroupEpicsOptions {
        order_by: Some(EpicOrderBy::CreatedAt),
        sort: Some(SortOrder::Asc),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &1.into(), &created_asc).await.unwrap();
    assert_eq!(iids(&epics), vec![1, 2, 3, 4]);

    // Fixture update times run opposite to creation times
    let updated_desc = ListGroupEpicsOptions {
        order_by: Some(EpicOrderBy::UpdatedAt),
        ..Default::default()
    };
    let (epics, _) = Epic::list(&client, &1.into(), &updated_desc).await.unwrap();
    assert_eq!(iids(&epics), vec![1, 2, 3, 4]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_pages_through_results() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let (first, response) = Epic::list(&client, &1.into(), &ListGroupEpicsOptions::for_page(1, 3))
        .await
        .unwrap();
    assert_eq!(iids(&first), vec![4, 3, 2]);
    assert_eq!(response.page_info.total_pages, Some(2));
    assert_eq!(response.page_info.next_page, Some(2));
    assert_eq!(response.page_info.prev_page, None);

    let next = response.page_info.next_page.unwrap();
    let (second, response) =
        Epic::list(&client, &1.into(), &ListGroupEpicsOptions::for_page(next, 3))
            .await
            .unwrap();
    assert_eq!(iids(&second), vec![1]);
    assert_eq!(response.page_info.next_page, None);
    assert!(!response.has_more());

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_empty_group_returns_empty_vec() {
    let state = MockState::new().with_group(5, "quiet");
    let server = MockServer::with_state(state).await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let (epics, response) = client
        .epics()
        .list_group_epics("quiet", &ListGroupEpicsOptions::default())
        .await
        .unwrap();

    assert!(epics.is_empty());
    assert_eq!(response.page_info.total, Some(0));

    server.shutdown().await;
}

// =============================================================================
// Get Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_then_get_matches() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let (epics, _) = client
        .epics()
        .list_group_epics("acme", &ListGroupEpicsOptions::default())
        .await
        .unwrap();
    let listed = &epics[0];

    let fetched = Epic::get(&client, ("acme".into(), listed.iid)).await.unwrap();
    assert_eq!(&fetched, listed);
    assert!(fetched.due_date_is_fixed);

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_are_visible() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    server
        .state()
        .write()
        .await
        .epics
        .entry(2)
        .or_default()
        .push(Fixtures::epic(2, 2, "Service mesh", "opened", &["infra"]));

    let epic = client.epics().get_group_epic(2, 2).await.unwrap();
    assert_eq!(epic.title, "Service mesh");

    server.shutdown().await;
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let server = MockServer::start().await;
    let client = GitlabClient::new("test-token", server.url()).unwrap();

    let err = client
        .epics()
        .list_group_epics("nope", &ListGroupEpicsOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("404 Group Not Found"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let state = MockState::new()
        .with_group(1, "acme")
        .with_required_token("right-token");
    let server = MockServer::with_state(state).await;

    let client = GitlabClient::new("wrong-token", server.url()).unwrap();
    let err = client
        .epics()
        .list_group_epics(1, &ListGroupEpicsOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    let client = GitlabClient::new("right-token", server.url()).unwrap();
    let (epics, _) = client
        .epics()
        .list_group_epics(1, &ListGroupEpicsOptions::default())
        .await
        .unwrap();
    assert!(epics.is_empty());

    server.shutdown().await;
}
