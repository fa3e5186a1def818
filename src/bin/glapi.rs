//! GitLab epics CLI binary.
//!
//! A command-line interface for the GitLab epics API.

use clap::Parser;
use glapi::cli::{Cli, Command, Entity};
use glapi::mcp::GitlabServer;
use glapi::{ApiResponse, Epic, GitlabClient, GroupId, ListGroupEpicsOptions, PrettyPrint};
use rmcp::ServiceExt;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let client = match GitlabClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set GITLAB_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &GitlabClient, cli: Cli) -> glapi::Result<()> {
    match cli.command {
        Command::Get { entity, group, iid } => handle_get(client, entity, group, iid, cli.json).await,
        Command::List {
            entity,
            group,
            filters,
        } => handle_list(client, entity, group, filters.into(), cli.json).await,
        Command::Mcp => serve_mcp(client.clone()).await,
    }
}

async fn handle_get(
    client: &GitlabClient,
    entity: Entity,
    group: GroupId,
    iid: u64,
    json: bool,
) -> glapi::Result<()> {
    match entity {
        Entity::Epic => {
            let epic = client.epics().get_group_epic(group, iid).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&epic)?);
            } else {
                println!("{}", epic.pretty_print());
            }
        }
    }
    Ok(())
}

async fn handle_list(
    client: &GitlabClient,
    entity: Entity,
    group: GroupId,
    options: ListGroupEpicsOptions,
    json: bool,
) -> glapi::Result<()> {
    match entity {
        Entity::Epic => {
            let (epics, response) = client.epics().list_group_epics(group, &options).await?;
            output_list(&epics, &response, json, |e| EpicRow::from(e))?;
        }
    }
    Ok(())
}

async fn serve_mcp(client: GitlabClient) -> glapi::Result<()> {
    let service = GitlabServer::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| glapi::GitlabError::Mcp(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| glapi::GitlabError::Mcp(e.to_string()))?;
    Ok(())
}

fn output_list<T, R, F>(
    items: &[T],
    response: &ApiResponse,
    json: bool,
    to_row: F,
) -> glapi::Result<()>
where
    T: serde::Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    let rows: Vec<R> = items.iter().map(to_row).collect();
    println!("{}", Table::new(rows));

    let info = &response.page_info;
    let page = info.page.unwrap_or(1);
    match (info.total_pages, info.total) {
        (Some(pages), Some(total)) => println!("\nPage {page}/{pages} ({total} total items)"),
        _ if info.has_more() => println!("\nPage {page} (more available)"),
        _ => println!("\nPage {page} (end)"),
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct EpicRow {
    iid: u64,
    title: String,
    state: String,
    author: String,
    labels: String,
    due: String,
}

impl From<&Epic> for EpicRow {
    fn from(e: &Epic) -> Self {
        Self {
            iid: e.iid,
            title: e.title.clone(),
            state: e.state.clone(),
            author: e.author_username().unwrap_or_default().to_string(),
            labels: e.labels.join(", "),
            due: e
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}
