// Rust guideline compliant 2026-10-16

//! Implementation of the `rkit render` command.
//!
//! Runs the HTTP adapter against an in-memory reply and prints what it
//! would have sent.

use crate::load_config;
use anyhow::{Context, Result};
use replykit_core::{MemoryLogger, RawError, Replykit, RequestContext};
use replykit_http::{BufferedReply, HttpResponder};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Inputs for one preview.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Status code to send.
    pub status: u16,
    /// Envelope message.
    pub message: Option<String>,
    /// Success payload as JSON text.
    pub data: Option<String>,
    /// Raw error as JSON text.
    pub error: Option<String>,
    /// Correlation id to use instead of a generated one.
    pub request_id: Option<String>,
    /// Include captured log lines in the output.
    pub logs: bool,
}

/// Renders the reply for `request` as a JSON document.
///
/// # Errors
///
/// Returns an error if the config is invalid, a JSON argument does not
/// parse, or the adapter fails.
pub fn render(file: Option<&Path>, request: &RenderRequest) -> Result<Value> {
    let config = load_config(file)?;
    let logger = Arc::new(MemoryLogger::new());
    let kit = Replykit::new(config, logger.clone())?;

    let ctx = match &request.request_id {
        Some(id) => RequestContext::new().with_correlation_id(id.clone()).started_now(),
        None => RequestContext::generated(),
    }
    .http("RENDER", "/");

    let data = parse_json("--data", request.data.as_deref())?;
    let mut responder = HttpResponder::new(&kit, BufferedReply::new(), ctx);
    match parse_json("--error", request.error.as_deref())? {
        Value::Null => responder.respond(request.status, data, request.message.as_deref())?,
        raw => {
            let mut error = RawError::from_value(&raw);
            if let Some(message) = &request.message {
                error.message = Some(message.clone());
            }
            responder.error(error, Some(request.status))?;
        }
    }

    let reply = responder.into_reply();
    let headers: Map<String, Value> = reply
        .headers()
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
        .collect();
    let mut output = json!({
        "status": reply.status(),
        "headers": headers,
        "body": reply.body(),
    });
    if request.logs {
        output["logs"] = serde_json::to_value(logger.records())?;
    }
    Ok(output)
}

/// Prints the rendered reply.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn execute(file: Option<&Path>, request: &RenderRequest) -> Result<()> {
    let output = render(file, request)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_json(flag: &str, text: Option<&str>) -> Result<Value> {
    match text {
        Some(text) => {
            serde_json::from_str(text).with_context(|| format!("{flag} is not valid JSON"))
        }
        None => Ok(Value::Null),
    }
}
