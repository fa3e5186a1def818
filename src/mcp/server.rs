//! MCP Server handler for the GitLab epics API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    mcp::{GetParams, ListParams},
    Epic, ErrorKind, GitlabClient, GitlabError, PageInfo, MAX_PER_PAGE,
};

/// Page size used when the caller does not ask for one.
const DEFAULT_PER_PAGE: u32 = 20;

/// GitLab MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to read group
/// epics through the Model Context Protocol.
///
/// # Tools
///
/// - `get` - Fetch a single epic by group and IID
/// - `list` - List a group's epics with filters and pagination
///
/// # Example
///
/// ```no_run
/// use glapi::mcp::GitlabServer;
///
/// # fn main() -> glapi::Result<()> {
/// let server = GitlabServer::from_env()?;
/// // Server can now be used with rmcp transport
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitlabServer {
    client: Arc<GitlabClient>,
}

/// Body of a `list` tool result.
#[derive(Serialize)]
struct ListResult<'a> {
    items: &'a [Epic],
    page_info: &'a PageInfo,
}

impl GitlabServer {
    /// Create a new GitlabServer from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GITLAB_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = GitlabClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new GitlabServer with an existing client.
    pub fn new(client: GitlabClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert GitlabError to McpError.
    fn to_mcp_error(err: GitlabError) -> McpError {
        if err.status_code() == Some(404) {
            return McpError::resource_not_found(format!("Not found: {err}"), None);
        }
        match err.kind() {
            ErrorKind::InvalidIdentifier | ErrorKind::Configuration => {
                McpError::invalid_params(format!("Invalid parameters: {err}"), None)
            }
            ErrorKind::RequestConstructionFailed | ErrorKind::TransportFailure => {
                McpError::internal_error(err.to_string(), None)
            }
        }
    }

    fn to_text<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Handle the `get` tool.
    ///
    /// Returns the epic as pretty-printed JSON in a `CallToolResult`.
    ///
    /// # Errors
    ///
    /// Returns an MCP error if the group identifier is invalid or the
    /// underlying API call fails.
    pub async fn handle_get(&self, params: GetParams) -> Result<CallToolResult, McpError> {
        let epic = self
            .client
            .epics()
            .get_group_epic(params.group, params.iid)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::to_text(&epic)
    }

    /// Handle the `list` tool.
    pub async fn handle_list(&self, params: ListParams) -> Result<CallToolResult, McpError> {
        let group = params.group.clone();
        let options = params.into_options(DEFAULT_PER_PAGE, MAX_PER_PAGE);

        let (epics, response) = self
            .client
            .epics()
            .list_group_epics(group, &options)
            .await
            .map_err(Self::to_mcp_error)?;

        Self::to_text(&ListResult {
            items: &epics,
            page_info: &response.page_info,
        })
    }
}

impl ServerHandler for GitlabServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "glapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some("GitLab MCP Server - Query group epics.".to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get",
                "Fetch a single GitLab epic by group (numeric ID or full path) and epic IID.",
                Self::schema::<GetParams>(),
            ),
            Tool::new(
                "list",
                "List the epics of a GitLab group, one page at a time. \
                 Filters: author_id, labels (all must match), state, search. \
                 Ordering: order_by (created_at, updated_at) and sort (asc, desc). \
                 The result carries page_info with next_page when more pages exist.",
                Self::schema::<ListParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "get" => {
                let params: GetParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_get(params).await
            }
            "list" => {
                let params: ListParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_list(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}
