//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the glapi binary.

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{EpicOrderBy, EpicState, GroupId, ListGroupEpicsOptions, ListOptions, SortOrder};

/// GitLab API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "glapi", about = "GitLab epics CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by group and IID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// Group ID or full path (e.g., "gitlab-org/quality").
        #[arg(value_parser = GroupId::from_str)]
        group: GroupId,

        /// The resource IID within the group.
        iid: u64,
    },

    /// List resources of a group with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Group ID or full path (e.g., "gitlab-org/quality").
        #[arg(value_parser = GroupId::from_str)]
        group: GroupId,

        #[command(flatten)]
        filters: EpicFilters,
    },

    /// Serve the MCP tools over stdio.
    Mcp,
}

/// Filter and pagination flags for listing epics.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct EpicFilters {
    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Only the epic with this ID.
    #[arg(long)]
    pub id: Option<u64>,

    /// Only epics created by this user ID.
    #[arg(long)]
    pub author_id: Option<u64>,

    /// Only epics with all of these labels (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Field to order by.
    #[arg(long, value_enum)]
    pub order_by: Option<EpicOrderBy>,

    /// Sort direction.
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Search in title and description.
    #[arg(long)]
    pub search: Option<String>,

    /// Only epics in this state.
    #[arg(long, value_enum)]
    pub state: Option<EpicState>,
}

impl From<EpicFilters> for ListGroupEpicsOptions {
    fn from(f: EpicFilters) -> Self {
        Self {
            list: ListOptions {
                page: f.page,
                per_page: f.per_page,
            },
            id: f.id,
            author_id: f.author_id,
            labels: f.labels,
            order_by: f.order_by,
            sort: f.sort,
            search: f.search,
            state: f.state,
        }
    }
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A group epic.
    #[value(alias = "epics")]
    Epic,
}
