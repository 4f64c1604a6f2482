//! Reply requests to the chat backend.
//!
//! The backend takes `{"message", "client_id"}` and answers with a JSON
//! envelope whose `reply` field holds the markdown text. There is no timeout
//! or retry: a request resolves, fails, or waits on the browser's network
//! stack.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config::CHAT_ENDPOINT;
use crate::core::error::ChatError;
use crate::utils::dom;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    client_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    reply: Option<String>,
}

/// Send one user message and wait for the reply text.
pub async fn send_message(message: &str, client_id: &str) -> Result<String, ChatError> {
    if !dom::is_online() {
        return Err(ChatError::Offline);
    }

    let request = Request::post(CHAT_ENDPOINT)
        .json(&ChatRequest { message, client_id })
        .map_err(|_| ChatError::RequestCreationFailed)?;

    let response = request
        .send()
        .await
        .map_err(|e| ChatError::NetworkError(e.to_string()))?;

    if !response.ok() {
        return Err(ChatError::HttpError(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ChatError::NetworkError(e.to_string()))?;

    parse_reply(&body)
}

/// Extract the reply text from a response body.
pub fn parse_reply(body: &str) -> Result<String, ChatError> {
    let envelope: ChatResponse =
        serde_json::from_str(body).map_err(|e| ChatError::JsonParseError(e.to_string()))?;

    match envelope.reply {
        Some(reply) if !reply.trim().is_empty() => Ok(reply),
        _ => Err(ChatError::EmptyReply),
    }
}
