//! Basic example demonstrating the GitLab epics client.
//!
//! Run with:
//! ```
//! GITLAB_TOKEN=your-token cargo run --example basic -- gitlab-org
//! ```

use glapi::{Epic, EpicState, Get, GitlabClient, GroupId, List, ListGroupEpicsOptions};

#[tokio::main]
async fn main() -> glapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let group: GroupId = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gitlab-org".to_string())
        .parse()?;

    println!("Creating GitLab client...");
    let client = GitlabClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // First page of open epics, most recently updated first
    println!("\n--- Listing open epics of {group} ---");
    let options = ListGroupEpicsOptions {
        state: Some(EpicState::Opened),
        order_by: Some(glapi::EpicOrderBy::UpdatedAt),
        ..ListGroupEpicsOptions::for_page(1, 10)
    };
    let (epics, response) = Epic::list(&client, &group, &options).await?;
    println!(
        "Found {} epics (total: {:?}, next page: {:?})",
        epics.len(),
        response.page_info.total,
        response.page_info.next_page
    );

    for epic in &epics {
        println!("  &{} {} [{}]", epic.iid, epic.title, epic.labels.join(", "));
    }

    if let Some(first) = epics.first() {
        println!("\n--- Getting epic details ---");
        let epic = Epic::get(&client, (group.clone(), first.iid)).await?;
        println!("Epic: {}", epic.title);
        println!("  Author: {}", epic.author_username().unwrap_or("unknown"));
        println!("  Start: {:?}", epic.start_date);
        println!("  Due: {:?}", epic.due_date);
        println!("  URL: {}", epic.web_url);
    }

    Ok(())
}
