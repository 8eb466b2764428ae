use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use schemars::JsonSchema;
use serde::Deserialize;

use crate::service::{AppService, PrInput};

// ---------------------------------------------------------------------------
// Tool parameter structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PrGenerateParams {
    /// Unified diff text
    #[serde(default)]
    pub diff: String,
    /// Issue / ticket / PR body text
    #[serde(default)]
    pub issue: String,
    /// Changed file paths (default: files named in the diff)
    #[serde(default)]
    pub files: Option<Vec<String>>,
    /// Markdown template with {{title}}, {{change}}, {{context}}, {{impact}}, {{checklist}}
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PrAnalyzeParams {
    /// Unified diff text
    #[serde(default)]
    pub diff: String,
    /// Issue / ticket / PR body text
    #[serde(default)]
    pub issue: String,
    /// Changed file paths (default: files named in the diff)
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct IssueParseParams {
    /// Issue / ticket text
    pub text: String,
}

// ---------------------------------------------------------------------------
// MCP Server
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PrScribeServer {
    tool_router: ToolRouter<Self>,
    service: std::sync::Arc<AppService>,
}

impl Default for PrScribeServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PrScribeServer {
    pub fn new() -> Self {
        Self::with_service(AppService::bounded())
    }

    pub fn with_service(service: AppService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service: std::sync::Arc::new(service),
        }
    }

    #[tool(
        name = "pr_generate",
        description = "Generate a pull request title and markdown body \
                       from a unified diff and issue text"
    )]
    async fn pr_generate(
        &self,
        params: Parameters<PrGenerateParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let input = PrInput {
            diff: &p.diff,
            issue: &p.issue,
            files: p.files.as_deref(),
        };
        Self::to_tool_result(
            self.service
                .generate_with_template(&input, p.template.as_deref()),
        )
    }

    #[tool(
        name = "pr_analyze",
        description = "Analyze a unified diff and issue text: parsed hunks, \
                       per-function semantics, intent, classification and risk"
    )]
    async fn pr_analyze(
        &self,
        params: Parameters<PrAnalyzeParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        let input = PrInput {
            diff: &p.diff,
            issue: &p.issue,
            files: p.files.as_deref(),
        };
        Self::to_tool_result(self.service.analyze(&input))
    }

    #[tool(
        name = "issue_parse",
        description = "Extract intent (bug/feature/refactor/update), summary \
                       and constraints from issue text"
    )]
    async fn issue_parse(
        &self,
        params: Parameters<IssueParseParams>,
    ) -> Result<CallToolResult, McpError> {
        Self::to_tool_result(self.service.parse_issue(&params.0.text))
    }
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

impl PrScribeServer {
    fn to_tool_result<T: serde::Serialize>(
        result: anyhow::Result<T>,
    ) -> Result<CallToolResult, McpError> {
        match result {
            Ok(value) => {
                let json = serde_json::to_string(&value)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerHandler implementation
// ---------------------------------------------------------------------------

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PrScribeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::new(
                "pr-scribe",
                env!("CARGO_PKG_VERSION"),
            ))
    }
}
