//! MCP Server implementation.
//!
//! Tools mirror the core operations one-to-one: mutators return the updated
//! sequence plus its validation status, getters are read-only, and every
//! failure comes back as a `{"success": false, "error": ...}` payload.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars::{self, JsonSchema},
    tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use pcba_core::{BlockType, Error, Orchestrator, RECIPES, Validation};
use pcba_rag::DEFAULT_K;

use crate::state::AppState;

/// PCBA line MCP server
///
/// Provides MCP tools for configuring and validating the assembly sequence
/// and for querying the process documentation.
#[derive(Clone)]
pub struct McpServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    fn sequence_payload(line: &Orchestrator) -> String {
        let validation = line.validation();
        json!({
            "success": true,
            "sequence": line.sequence().slots().iter().map(|slot| json!({
                "block": slot.block.name(),
                "subParam": slot.sub_param,
            })).collect::<Vec<_>>(),
            "status": validation.to_string(),
            "valid": validation.is_valid(),
        })
        .to_string()
    }

    fn error_payload(err: impl std::fmt::Display) -> String {
        json!({"success": false, "error": err.to_string()}).to_string()
    }
}

/// Parameters for set_block_at_position tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SetBlockParams {
    /// Position (0-4) in the sequence
    pos: usize,
    /// Block type display name, e.g. "Soldering"
    #[serde(rename = "blockType")]
    block_type: String,
}

/// Parameters for set_sub_param_at_position tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SetSubParamParams {
    /// Position (0-4) in the sequence
    pos: usize,
    /// Sub-parameter value, legal set depends on the block at `pos`
    #[serde(rename = "subParam")]
    sub_param: String,
}

/// Parameters for set_pattern tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SetPatternParams {
    /// Pattern number (1-9)
    #[serde(rename = "patternNumber")]
    pattern_number: usize,
}

/// Parameters for get_block_sub_params tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct BlockSubParamsParams {
    /// Block type to query; omit to get the whole catalog
    #[serde(rename = "blockType", skip_serializing_if = "Option::is_none")]
    block_type: Option<String>,
}

/// Parameters for query_process_docs tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct QueryDocsParams {
    /// The search query about PCB processes, materials, or techniques
    query: String,
    /// Number of documentation chunks to retrieve (default 2)
    #[serde(skip_serializing_if = "Option::is_none")]
    k: Option<usize>,
}

#[tool_router]
impl McpServer {
    /// Set a specific block type at a given position
    #[tool(
        description = "Set a block type at a position (0-4). Valid block types: 'Solder Paste Application', 'Component Placement', 'Soldering', 'Optical Inspection', 'Testing'. Resets the slot's sub-parameter to the block's first legal value."
    )]
    async fn set_block_at_position(
        &self,
        Parameters(params): Parameters<SetBlockParams>,
    ) -> String {
        let mut line = self.state.line.write().await;
        match line.set_block_named(params.pos, &params.block_type) {
            Ok(_) => {
                debug!(
                    "set_block_at_position: pos={} block={}",
                    params.pos, params.block_type
                );
                Self::sequence_payload(&line)
            }
            Err(e) => Self::error_payload(e),
        }
    }

    /// Set a sub-parameter at a given position
    #[tool(
        description = "Set a sub-parameter at a position (0-4). The value must be legal for the block type currently at that position; the error lists the legal options otherwise."
    )]
    async fn set_sub_param_at_position(
        &self,
        Parameters(params): Parameters<SetSubParamParams>,
    ) -> String {
        let mut line = self.state.line.write().await;
        match line.set_sub_param(params.pos, &params.sub_param) {
            Ok(_) => {
                debug!(
                    "set_sub_param_at_position: pos={} value={}",
                    params.pos, params.sub_param
                );
                Self::sequence_payload(&line)
            }
            Err(e) => Self::error_payload(e),
        }
    }

    /// Get the current sequence with its validation status
    #[tool(description = "Get the current state of the sequence: all five (block, sub-parameter) slots plus validation status.")]
    async fn get_current_sequence(&self) -> String {
        let line = self.state.line.read().await;
        Self::sequence_payload(&line)
    }

    /// Execute the current sequence if it is valid
    #[tool(
        description = "Execute the current sequence if it is valid. No machine action occurs; this is the confirmation gate and is safe to call repeatedly."
    )]
    async fn execute_sequence(&self) -> String {
        let line = self.state.line.read().await;
        match line.execute() {
            Ok(number) => json!({
                "success": true,
                "executed": true,
                "pattern": number,
                "name": RECIPES[number - 1].name,
            })
            .to_string(),
            Err(e) => Self::error_payload(e),
        }
    }

    /// Check whether the current sequence matches a valid pattern
    #[tool(description = "Check if the current sequence is valid and which pattern it matches.")]
    async fn get_pattern_validity(&self) -> String {
        let line = self.state.line.read().await;
        let validation = line.validation();
        match validation {
            Validation::Valid { number } => json!({
                "success": true,
                "valid": true,
                "pattern": number,
                "status": validation.to_string(),
            }),
            Validation::Invalid => json!({
                "success": true,
                "valid": false,
                "status": validation.to_string(),
            }),
        }
        .to_string()
    }

    /// List all valid sequence patterns
    #[tool(description = "List all valid sequence patterns the orchestrator accepts, with their names and steps.")]
    fn get_valid_patterns(&self) -> String {
        let patterns = RECIPES
            .iter()
            .enumerate()
            .map(|(idx, recipe)| {
                json!({
                    "number": idx + 1,
                    "name": recipe.name,
                    "steps": recipe.steps.iter().map(|(block, param)| json!({
                        "block": block.name(),
                        "subParam": param,
                    })).collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>();

        json!({
            "success": true,
            "count": patterns.len(),
            "patterns": patterns,
        })
        .to_string()
    }

    /// Get legal sub-parameters for a block type
    #[tool(
        description = "Get valid sub-parameters for one block type, or the whole block catalog when no block type is given."
    )]
    fn get_block_sub_params(
        &self,
        Parameters(params): Parameters<BlockSubParamsParams>,
    ) -> String {
        match params.block_type {
            Some(name) => match BlockType::parse(&name) {
                Some(block) => json!({
                    "success": true,
                    "blockType": block.name(),
                    "subParams": block.sub_params(),
                })
                .to_string(),
                None => Self::error_payload(Error::UnknownBlockType(name)),
            },
            None => {
                let catalog = BlockType::ALL
                    .iter()
                    .map(|block| {
                        json!({
                            "blockType": block.name(),
                            "subParams": block.sub_params(),
                        })
                    })
                    .collect::<Vec<_>>();
                json!({"success": true, "catalog": catalog}).to_string()
            }
        }
    }

    /// Apply a valid pattern by number
    #[tool(description = "Overwrite the whole sequence with a valid pattern by number (1-9).")]
    async fn set_pattern(&self, Parameters(params): Parameters<SetPatternParams>) -> String {
        let mut line = self.state.line.write().await;
        match line.apply_recipe(params.pattern_number) {
            Ok(_) => {
                debug!("set_pattern: {}", params.pattern_number);
                Self::sequence_payload(&line)
            }
            Err(e) => Self::error_payload(e),
        }
    }

    /// Search the process documentation
    #[tool(
        description = "Search the process documentation for information about PCB assembly processes, materials, or techniques."
    )]
    async fn query_process_docs(&self, Parameters(params): Parameters<QueryDocsParams>) -> String {
        let Some(rag) = &self.state.rag else {
            return Self::error_payload(
                "Process documentation is not configured. Set PCBA_DOCS_DIR and restart.",
            );
        };

        let k = params.k.unwrap_or(DEFAULT_K);
        match rag.search(&params.query, k).await {
            Ok(text) => json!({"success": true, "result": text}).to_string(),
            Err(e) => Self::error_payload(e),
        }
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PCBA Line MCP Server - configure the 5-step assembly sequence, validate it against the known-good patterns, execute it, and look up process documentation."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
