//! Tool router: registers and dispatches tool calls.
//!
//! Each tool is a function that takes JSON arguments and returns a
//! [`ToolCallResult`]. The router owns the scoring configuration and the
//! (single) practice session, and provides `list_tools()` / `call_tool()`
//! for the server.

pub mod practice;
pub mod score;

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::practice::{Deck, PracticeSession};
use crate::scoring::Scorer;

/// Tool advertised in `tools/list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    pub(crate) fn new(name: &str, description: &str, input_schema: serde_json::Value) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            input_schema,
        }
    }
}

/// One block of tool output. Every tool here answers in text.
#[derive(Debug, Serialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub text: String,
}

/// Result of a tool call. Failures inside a tool set `is_error` instead of
/// becoming JSON-RPC errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ContentItem>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text",
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(reason: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ContentItem {
                content_type: "text",
                text: format!("Error: {reason}"),
            }],
            is_error: true,
        }
    }
}

/// Tool router that dispatches tool calls to implementations.
pub struct ToolRouter {
    scorer: Scorer,
    session: Mutex<Option<PracticeSession>>,
}

impl ToolRouter {
    /// Create a new tool router with no practice session loaded.
    pub const fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            session: Mutex::new(None),
        }
    }

    pub const fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Replace the current practice session with a fresh one over `deck`.
    pub fn start_session(&self, deck: Deck) {
        *self.session() = Some(PracticeSession::new(deck, self.scorer));
    }

    pub(crate) fn session(&self) -> MutexGuard<'_, Option<PracticeSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// List all available tools with their JSON Schema definitions.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        let mut tools = vec![score::similarity_definition(), score::grade_definition()];
        tools.extend(practice::tool_definitions());
        tools
    }

    /// Call a tool by name with the given JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed or a result cannot
    /// be serialized. Unknown tools and session errors are `is_error` results.
    pub fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<ToolCallResult> {
        debug!(tool = name, "dispatching tool call");

        match name {
            "similarity" => score::similarity(&self.scorer, arguments),
            "grade" => score::grade(&self.scorer, arguments),
            "practice_load" => practice::load(self, arguments),
            "practice_current" => practice::current(self),
            "practice_answer" => practice::answer(self, arguments),
            "practice_next" => practice::next(self),
            "practice_save" => practice::save(self),
            "practice_toggle_saved" => practice::toggle_saved(self),
            "practice_restart" => practice::restart(self),
            _ => Ok(ToolCallResult::error(format_args!("unknown tool: {name}"))),
        }
    }
}
