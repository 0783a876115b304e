//! Burrow MCP Server
//!
//! An MCP server that gives an agent its own in-memory filesystem. Each of
//! the seven filesystem tools (`fs_info`, `fs_ls`, `fs_write`, `fs_mkdir`,
//! `fs_read`, `fs_glob`, `fs_grep`) is advertised with a JSON Schema and
//! answers with a `{status, error, response}` envelope as text content.

use std::sync::Arc;

use burrow::tools::{FsResponse, FsToolbox, ToolDefinition, ToolRegistry};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tokio::sync::Mutex;

/// MCP Server backed by one Burrow filesystem.
///
/// Clones share the same filesystem. Tool calls take a lock on it, so they
/// run one at a time in arrival order.
#[derive(Clone)]
pub struct BurrowServer {
    toolbox: Arc<Mutex<FsToolbox>>,
}

impl std::fmt::Debug for BurrowServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurrowServer").finish_non_exhaustive()
    }
}

impl Default for BurrowServer {
    fn default() -> Self {
        Self::new(FsToolbox::default())
    }
}

impl BurrowServer {
    /// Serve the filesystem held by `toolbox`.
    pub fn new(toolbox: FsToolbox) -> Self {
        Self {
            toolbox: Arc::new(Mutex::new(toolbox)),
        }
    }

    /// The MCP tool list, in registry order.
    pub async fn tools(&self) -> Vec<Tool> {
        let toolbox = self.toolbox.lock().await;
        toolbox
            .registry()
            .definitions()
            .iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Run one tool call against the filesystem.
    ///
    /// Filesystem and argument errors come back as error envelopes in a
    /// result flagged `is_error`; only an unknown tool name is a protocol
    /// error.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let mut toolbox = self.toolbox.lock().await;
        if !toolbox.registry().has_tool(name) {
            return Err(McpError::invalid_params(
                format!("Unknown tool: {}", name),
                None,
            ));
        }

        let args = arguments.map_or(serde_json::Value::Null, serde_json::Value::Object);
        let response = toolbox.call(name, args);
        Ok(to_call_result(&response))
    }
}

/// Convert a registry definition into an MCP tool.
pub fn to_mcp_tool(def: &ToolDefinition) -> Tool {
    let input_schema = match def.parameters() {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    };

    Tool {
        name: def.name.clone().into(),
        title: Some(def.summary().description.into()),
        description: Some(def.description.clone().into()),
        input_schema,
        output_schema: None,
        annotations: None,
        icons: None,
        meta: None,
    }
}

fn to_call_result(response: &FsResponse) -> CallToolResult {
    let content = vec![Content::text(response.to_json())];
    if response.is_ok() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

impl ServerHandler for BurrowServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Burrow is a private scratch filesystem that lives for this session only. \
                Keep notes for yourself under /memories and files for the user under \
                /artifacts. Use fs_write and fs_mkdir to create, fs_read, fs_ls and fs_info \
                to inspect, and fs_glob and fs_grep to search. Every tool returns a JSON \
                object with 'status', 'error' and 'response'."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools().await,
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "call_tool");
        self.dispatch(&request.name, request.arguments).await
    }
}
