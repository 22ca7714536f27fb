//! Scoring server: newline-delimited JSON-RPC 2.0 on stdin/stdout.
//!
//! A practice front end (or any host process) sends one request per line and
//! reads one response per line. The method set is the small MCP tool surface
//! (`initialize`, `tools/list`, `tools/call`, `ping`); everything scoring- or
//! practice-specific lives behind `tools/call` in [`crate::tools`].

use std::io::{BufRead, Read as _, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::practice::Deck;
use crate::scoring::Scorer;
use crate::tools::ToolRouter;

/// Longest accepted request line, newline excluded.
const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

const PROTOCOL_VERSION: &str = "2025-06-18";

/// Server settings, filled from the command line.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Threshold and input cap used by every scoring tool.
    pub scorer: Scorer,
    /// Deck to open a practice session with at startup.
    pub deck: Option<PathBuf>,
}

/// An incoming request. A missing `id` marks a notification.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC error codes the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Parse,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    Internal,
}

impl ErrorCode {
    pub const fn code(self) -> i64 {
        match self {
            Self::Parse => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// An outgoing response: exactly one of `result` / `error` is set.
#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn ok(id: Option<Value>, result: &impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                jsonrpc: "2.0",
                id,
                result: Some(value),
                error: None,
            },
            Err(e) => Self::fail(id, ErrorCode::Internal, format!("failed to serialize result: {e}")),
        }
    }

    pub fn fail(id: Option<Value>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code: code.code(),
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Run the server on stdin/stdout.
///
/// Loads the configured deck (if any), then serves until stdin is closed.
///
/// # Errors
///
/// Returns an error if the deck cannot be loaded or stdin/stdout I/O fails.
pub fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        threshold = config.scorer.threshold(),
        max_chars = config.scorer.max_chars(),
        deck = ?config.deck,
        "youngs-catch server starting"
    );

    let router = ToolRouter::new(config.scorer);
    if let Some(path) = &config.deck {
        let deck = Deck::from_json_file(path)
            .with_context(|| format!("failed to load deck {}", path.display()))?;
        router.start_session(deck);
    }

    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();
    serve(&router, &mut input, &mut output)?;

    info!("youngs-catch server stopped");
    Ok(())
}

/// Answer requests from `input` until EOF, one response line per request.
///
/// # Errors
///
/// Returns an error only on I/O failure. Bad requests get error responses.
pub fn serve(router: &ToolRouter, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    loop {
        let line = match next_line(input, MAX_LINE_BYTES)? {
            Line::Eof => break,
            Line::Rejected(code, reason) => {
                warn!(reason, "request line rejected");
                send(output, &Response::fail(None, code, reason))?;
                continue;
            }
            Line::Text(line) => line,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(raw = line, "request");

        if let Some(response) = respond(router, line) {
            send(output, &response)?;
        }
    }

    info!("input closed");
    Ok(())
}

/// Turn one request line into its response. `None` for notifications.
fn respond(router: &ToolRouter, line: &str) -> Option<Response> {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return Some(Response::fail(None, ErrorCode::Parse, format!("parse error: {e}"))),
    };

    if request.jsonrpc != "2.0" {
        return Some(Response::fail(
            request.id,
            ErrorCode::InvalidRequest,
            format!("jsonrpc must be \"2.0\", got {:?}", request.jsonrpc),
        ));
    }

    let Some(id) = request.id.clone() else {
        debug!(method = request.method, "notification");
        if request.method == "tools/call" {
            // Practice tools change session state even without a reply.
            let _ = handle(router, &request);
        }
        return None;
    };

    Some(match handle(router, &request) {
        Ok(result) => Response::ok(Some(id), &result),
        Err((code, message)) => Response::fail(Some(id), code, message),
    })
}

fn handle(router: &ToolRouter, request: &Request) -> Result<Value, (ErrorCode, String)> {
    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": "youngs-catch",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": router.list_tools() })),
        "tools/call" => {
            let params: CallParams = serde_json::from_value(request.params.clone())
                .map_err(|e| (ErrorCode::InvalidParams, format!("invalid tools/call params: {e}")))?;
            let result = router.call_tool(&params.name, params.arguments).unwrap_or_else(|e| {
                warn!(tool = params.name, error = %e, "tool call failed");
                crate::tools::ToolCallResult::error(format_args!("{e:#}"))
            });
            serde_json::to_value(result)
                .map_err(|e| (ErrorCode::Internal, format!("failed to serialize result: {e}")))
        }
        other => Err((ErrorCode::MethodNotFound, format!("method not found: {other}"))),
    }
}

fn send(output: &mut impl Write, response: &Response) -> Result<()> {
    let mut line = serde_json::to_vec(response).context("failed to serialize response")?;
    line.push(b'\n');
    output.write_all(&line).context("failed to write response")?;
    output.flush().context("failed to flush output")
}

/// One framed input line.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Eof,
    Text(String),
    /// Oversized or not UTF-8; already consumed through its newline.
    Rejected(ErrorCode, String),
}

/// Read one line of at most `max_bytes` (newline excluded).
///
/// Never buffers more than `max_bytes + 1` bytes. The remainder of an
/// oversized line is skipped so the next read starts on a fresh line.
fn next_line(input: &mut impl BufRead, max_bytes: usize) -> Result<Line> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    let read = input
        .by_ref()
        .take(limit)
        .read_until(b'\n', &mut bytes)
        .context("failed to read request")?;
    if read == 0 {
        return Ok(Line::Eof);
    }

    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    } else if bytes.len() > max_bytes {
        input.skip_until(b'\n').context("failed to skip oversized request")?;
        return Ok(Line::Rejected(
            ErrorCode::InvalidRequest,
            format!("request exceeds {max_bytes} bytes"),
        ));
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(Line::Text(text)),
        Err(_) => Ok(Line::Rejected(ErrorCode::Parse, "request is not UTF-8".to_owned())),
    }
}
