//! Non-streaming call to the OpenAI-compatible chat-completions API.

use std::error::Error as StdError;
use std::fmt;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::api::upstream::{CompletionMessage, CompletionRequest, CompletionResponse};
use crate::core::config::ServerConfig;
use crate::utils::url::construct_api_url;

const INSUFFICIENT_BALANCE_MARKER: &str = "Insufficient Balance";

#[derive(Clone, Debug)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
}

impl UpstreamSettings {
    pub fn from_config(server: &ServerConfig, api_key: String) -> Self {
        Self {
            base_url: server.base_url().to_string(),
            api_key,
            model: server.model().to_string(),
            system_prompt: server.system_prompt().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum UpstreamError {
    /// The provider answered with a non-success status.
    Status { status: StatusCode, body: String },
    Transport(reqwest::Error),
    Decode(serde_json::Error),
    /// The provider returned no choice with text content.
    EmptyReply,
}

impl UpstreamError {
    pub fn is_insufficient_balance(&self) -> bool {
        match self {
            UpstreamError::Status { body, .. } => body.contains(INSUFFICIENT_BALANCE_MARKER),
            _ => false,
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Status { status, body } => {
                write!(f, "Error code: {} - {}", status.as_u16(), body.trim())
            }
            UpstreamError::Transport(source) => write!(f, "request to provider failed: {source}"),
            UpstreamError::Decode(source) => write!(f, "invalid provider response: {source}"),
            UpstreamError::EmptyReply => write!(f, "provider returned no reply content"),
        }
    }
}

impl StdError for UpstreamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            UpstreamError::Transport(source) => Some(source),
            UpstreamError::Decode(source) => Some(source),
            _ => None,
        }
    }
}

/// Send `message` with the configured system prompt and return the
/// assistant's text.
pub async fn complete_chat(
    client: &reqwest::Client,
    settings: &UpstreamSettings,
    message: &str,
) -> Result<String, UpstreamError> {
    let request = CompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            CompletionMessage::system(settings.system_prompt.clone()),
            CompletionMessage::user(message),
        ],
        stream: false,
    };

    let url = construct_api_url(&settings.base_url, "chat/completions");
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {}", settings.api_key))
        .json(&request)
        .send()
        .await
        .map_err(UpstreamError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        return Err(UpstreamError::Status { status, body });
    }

    let bytes = response.bytes().await.map_err(UpstreamError::Transport)?;
    let completion: CompletionResponse =
        serde_json::from_slice(&bytes).map_err(UpstreamError::Decode)?;
    completion
        .first_content()
        .map(str::to_string)
        .ok_or(UpstreamError::EmptyReply)
}
