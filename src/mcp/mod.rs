//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation for the GitLab epics
//! API, allowing AI assistants to list and read group epics.
//!
//! # Example
//!
//! ```no_run
//! use glapi::mcp::GitlabServer;
//!
//! # fn main() -> glapi::Result<()> {
//! let server = GitlabServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::GitlabServer;
