//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the analysis engine over the MCP protocol, making it
//! available to AI assistants and tutoring tools via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use, and each `#[tool]` method delegates to core library
//! functions rather than implementing analysis logic directly.
//!
//! # Adding Tools
//!
//! 1. Define a parameter struct with `Deserialize` + `JsonSchema`
//! 2. Add a `#[tool(description = "...")]` method to the `#[tool_router]` impl
//! 3. Call core library functions, convert errors to `McpError`
//! 4. Return `CallToolResult::success(vec![Content::text(...)])`

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use lexgrade_core::analysis::{self, AnalyzeOptions};
use lexgrade_core::{CefrLevel, Config, DEFAULT_MAX_INPUT_BYTES, readability};

use crate::commands::check_input_size;
use crate::commands::level::LevelReport;

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

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Number of distinct words to blank in the cloze test.
    pub blanks: Option<usize>,
    /// Seed for cloze word selection, for reproducible output.
    pub seed: Option<u64>,
}

/// Parameters for the `check_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckReadabilityParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `classify_level` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ClassifyLevelParams {
    /// The text to classify.
    pub text: String,
    /// Expected CEFR level (A1, A2, B1, B2). The result reports whether it matched.
    pub expect: Option<CefrLevel>,
}

/// Parameters for the `generate_cloze` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GenerateClozeParams {
    /// The source text.
    pub text: String,
    /// Number of distinct words to blank.
    pub blanks: Option<usize>,
    /// Seed for word selection, for reproducible output.
    pub seed: Option<u64>,
}

/// MCP server exposing the analysis engine to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    defaults: AnalyzeOptions,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with default settings.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            defaults: AnalyzeOptions::default(),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }

    /// Create a server that takes its defaults and input limit from `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            defaults: config.analyze_options(),
            max_input_bytes: config.input_limit(),
            ..Self::new()
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        check_input_size(text, self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    fn options(&self, blanks: Option<usize>, seed: Option<u64>) -> AnalyzeOptions {
        AnalyzeOptions {
            cloze_blanks: blanks.unwrap_or(self.defaults.cloze_blanks),
            seed: seed.or(self.defaults.seed),
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
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Full vocabulary and complexity analysis.
    #[tool(
        description = "Analyze English text for learners. Returns CEFR level, readability scores, lexical diversity, sentence structure, part-of-speech counts, top bigrams, and a cloze test."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_text", blanks = ?params.blanks, "executing MCP tool");
        self.check_size(&params.text)?;

        let report = analysis::analyze(&params.text, &self.options(params.blanks, params.seed));
        let json = to_json(&report)?;

        tracing::info!(
            tool = "analyze_text",
            level = %report.overall_level,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Readability formulas only.
    #[tool(
        description = "Check readability of text. Returns Flesch-Kincaid grade, Flesch reading ease, Gunning Fog, SMOG, and the word, sentence, and syllable counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_readability(
        &self,
        Parameters(params): Parameters<CheckReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_readability", "executing MCP tool");
        self.check_size(&params.text)?;

        let report = readability::check_readability(&params.text);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "check_readability",
            grade = report.scores.flesch_kincaid_grade,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// CEFR level estimate.
    #[tool(
        description = "Estimate the CEFR level (A1, A2, B1, B2) of text. Returns the level, the complexity score, its weighted terms, and whether it matched an optional expected level."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn classify_level(
        &self,
        Parameters(params): Parameters<ClassifyLevelParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "classify_level", expect = ?params.expect, "executing MCP tool");
        self.check_size(&params.text)?;

        let report = LevelReport::evaluate(&params.text, params.expect);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "classify_level",
            level = %report.level,
            matched = report.matched,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Cloze exercise.
    #[tool(
        description = "Generate a fill-in-the-blank exercise. Blanks every occurrence of randomly chosen content words and returns the text and the answer list."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn generate_cloze(
        &self,
        Parameters(params): Parameters<GenerateClozeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "generate_cloze", blanks = ?params.blanks, "executing MCP tool");
        self.check_size(&params.text)?;

        let test = analysis::build_cloze(&params.text, &self.options(params.blanks, params.seed));
        let json = to_json(&test)?;

        tracing::info!(
            tool = "generate_cloze",
            blanked = test.blanked_words.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
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
                "{} MCP server. Use analyze_text for a full CEFR report, classify_level for the level alone, check_readability for readability formulas, and generate_cloze for exercises.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
