//! The single outbound call the widget makes, and how its outcome becomes a
//! transcript entry.

use std::error::Error as StdError;
use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::api::{ChatReply, ChatRequest};
use crate::core::message::Message;

pub const FAILURE_PREFIX: &str = "An error occurred while sending your message: ";
pub const APP_ERROR_PREFIX: &str = "Error: ";

/// Why a request did not produce a usable reply.
#[derive(Debug)]
pub enum ChatError {
    /// The request never completed: connection refused, DNS failure, reset, etc.
    Transport(reqwest::Error),

    /// The endpoint answered with a status outside the success range.
    Status {
        status: StatusCode,
        /// Reason phrase for the status, or the numeric code when it has none.
        text: String,
    },

    /// The success body was not the expected JSON object.
    Decode(serde_json::Error),

    /// The success body carried neither a `response` nor an `error` field.
    UnexpectedShape,
}

impl ChatError {
    pub fn from_status(status: StatusCode) -> Self {
        let text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        ChatError::Status { status, text }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Transport(source) => write!(f, "{}", describe_transport_error(source)),
            ChatError::Status { text, .. } => write!(f, "Network response was not ok: {text}"),
            ChatError::Decode(source) => write!(f, "unexpected JSON in response: {source}"),
            ChatError::UnexpectedShape => {
                write!(f, "unexpected response: expected a \"response\" or \"error\" field")
            }
        }
    }
}

impl StdError for ChatError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChatError::Transport(source) => Some(source),
            ChatError::Decode(source) => Some(source),
            ChatError::Status { .. } | ChatError::UnexpectedShape => None,
        }
    }
}

/// `reqwest` keeps the interesting part ("Connection refused") in the source
/// chain, so flatten it into one line.
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = inner.source();
    }
    description
}

pub type ChatResult = Result<ChatReply, ChatError>;

/// POST `{"message": text}` to `endpoint` and decode the reply body.
pub async fn post_message(client: &reqwest::Client, endpoint: &str, text: &str) -> ChatResult {
    let request = ChatRequest {
        message: text.to_string(),
    };

    let response = client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/json")
        .json(&request)
        .send()
        .await
        .map_err(ChatError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::from_status(status));
    }

    let body = response.bytes().await.map_err(ChatError::Transport)?;
    let value: Value = serde_json::from_slice(&body).map_err(ChatError::Decode)?;
    reply_from_json(&value).ok_or(ChatError::UnexpectedShape)
}

/// Only a JSON object counts as a reply, and only string fields are read.
/// Arrays, scalars and mistyped fields never reach the transcript.
fn reply_from_json(value: &Value) -> Option<ChatReply> {
    let object = value.as_object()?;
    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    Some(ChatReply {
        response: field("response"),
        error: field("error"),
        details: field("details"),
    })
}

/// Map a decoded reply onto the assistant message it should display.
pub fn interpret_reply(reply: ChatReply) -> Result<Message, ChatError> {
    match reply {
        ChatReply {
            response: Some(text),
            ..
        } => Ok(Message::assistant(text)),
        ChatReply {
            error: Some(text), ..
        } => Ok(Message::assistant(format!("{APP_ERROR_PREFIX}{text}"))),
        _ => Err(ChatError::UnexpectedShape),
    }
}

pub fn failure_message(err: &ChatError) -> Message {
    Message::assistant(format!("{FAILURE_PREFIX}{err}"))
}

/// Resolved result of one request, ready to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub message: Message,
    pub failed: bool,
}

/// Turn any request result into exactly one assistant message. Failures are
/// also reported on the diagnostic channel.
pub fn resolve_outcome(result: ChatResult) -> ChatOutcome {
    match result.and_then(interpret_reply) {
        Ok(message) => ChatOutcome {
            message,
            failed: false,
        },
        Err(err) => {
            match &err {
                ChatError::UnexpectedShape => warn!(error = %err, "chat endpoint reply had no usable field"),
                _ => error!(error = %err, details = ?err, "chat request failed"),
            }
            ChatOutcome {
                message: failure_message(&err),
                failed: true,
            }
        }
    }
}

/// Spawns one task per send and funnels every result back over a channel so
/// the owner of the transcript can apply it on its own task.
#[derive(Clone)]
pub struct ChatService {
    tx: mpsc::UnboundedSender<ChatResult>,
    client: reqwest::Client,
    endpoint: String,
}

impl ChatService {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<ChatResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                client,
                endpoint: endpoint.into(),
            },
            rx,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fire and forget. The task always posts exactly one result.
    pub fn spawn_request(&self, text: String) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            debug!(%endpoint, chars = text.chars().count(), "sending chat message");
            let result = post_message(&client, &endpoint, &text).await;
            let _ = tx.send(result);
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, result: ChatResult) {
        let _ = self.tx.send(result);
    }
}
