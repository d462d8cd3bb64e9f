//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the prompt analyzer and the prompt library to AI assistants over
//! stdio. Each `#[tool]` method delegates to `promptshelf-core`; no library
//! logic lives here.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use promptshelf_core::analyzer;
use promptshelf_core::library::PromptFilter;
use promptshelf_core::{LibraryStore, MemoryStore};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_prompt` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzePromptParams {
    /// The prompt text to analyze.
    pub text: String,
    /// Return every triggered suggestion instead of a random sample of six.
    #[serde(default)]
    pub all: bool,
}

/// Parameters for the `search_prompts` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchPromptsParams {
    /// Case-insensitive text matched against title, content, and tags.
    #[serde(default)]
    pub query: Option<String>,
    /// Project id or name to restrict the search to.
    #[serde(default)]
    pub project: Option<String>,
    /// Only return favorites.
    #[serde(default)]
    pub favorites_only: bool,
    /// Maximum number of prompts to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

fn internal(e: impl std::fmt::Display) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing the analyzer and prompt library.
#[derive(Clone)]
pub struct ShelfServer {
    store: Arc<dyn LibraryStore>,
    max_input: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ShelfServer {
    fn default() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Some(promptshelf_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

#[tool_router]
impl ShelfServer {
    /// Create a server over `store`, rejecting text larger than `max_input`.
    pub fn new(store: Arc<dyn LibraryStore>, max_input: Option<usize>) -> Self {
        Self {
            store,
            max_input,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "library": self.store.describe(),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}\nLibrary: {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.store.describe(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a prompt and suggest improvements.
    #[tool(
        description = "Analyze a prompt. Returns word, character, and token counts, a 0-100 readability score, and categorized suggestions (clarity, specificity, structure, context, tone) with priorities."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_prompt(
        &self,
        Parameters(params): Parameters<AnalyzePromptParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_prompt", all = params.all, "executing MCP tool");

        crate::commands::check_input_size(&params.text, "text", self.max_input)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let result = if params.all {
            analyzer::analyze_unsampled(&params.text)
        } else {
            analyzer::analyze(&params.text)
        };
        let json = to_json(&result)?;

        tracing::info!(
            tool = "analyze_prompt",
            readability = result.readability_score,
            suggestions = result.suggestions.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Search the prompt library.
    #[tool(
        description = "Search saved prompts by text, project, or favorite status. Returns matching prompts, favorites first, then most recently updated."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn search_prompts(
        &self,
        Parameters(params): Parameters<SearchPromptsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "search_prompts", query = ?params.query, "executing MCP tool");

        let library = self.store.load().map_err(internal)?;
        let project_id = params
            .project
            .as_deref()
            .map(|key| library.find_project(key).map(|p| p.id))
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let filter = PromptFilter {
            search: params.query,
            project_id,
            category_id: None,
            favorites_only: params.favorites_only,
        };
        let mut found = library.filter(&filter);
        if let Some(limit) = params.limit {
            found.truncate(limit);
        }
        let json = to_json(&found)?;

        tracing::info!(tool = "search_prompts", matched = found.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ShelfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_prompt to review a prompt and search_prompts to find saved prompts.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
