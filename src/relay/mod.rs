//! HTTP relay between chat widgets and the model provider.
//!
//! Routes:
//! - `GET /` plain-text banner
//! - `GET /health` liveness probe
//! - `POST /chat` takes `{"message": ...}` and answers `{"response": ...}`
//!   or `{"error": ...}` with a matching status code

pub mod upstream;

use std::error::Error as StdError;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::api::{ChatReply, HealthStatus};
use crate::core::config::ServerConfig;

pub use upstream::{complete_chat, UpstreamError, UpstreamSettings};

pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const WELCOME_TEXT: &str =
    "Welcome to the relaychat API. Use POST /chat to interact with the chat model.";
pub const MISSING_MESSAGE_ERROR: &str = "Missing 'message' field in JSON payload";
pub const INSUFFICIENT_BALANCE_ERROR: &str =
    "Insufficient account balance. Please top up your account.";
pub const API_ERROR: &str = "API error occurred";
pub const INTERNAL_ERROR: &str = "An internal error occurred";

#[derive(Debug)]
pub enum RelayError {
    MissingApiKey,
    InvalidPort(String),
    Bind {
        addr: String,
        source: std::io::Error,
    },
    Serve(std::io::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::MissingApiKey => write!(
                f,
                "{API_KEY_ENV} not found in environment variables. Please set it securely."
            ),
            RelayError::InvalidPort(value) => {
                write!(f, "{PORT_ENV} must be a port number, got {value:?}")
            }
            RelayError::Bind { addr, source } => write!(f, "Failed to bind {addr}: {source}"),
            RelayError::Serve(source) => write!(f, "Relay server stopped: {source}"),
        }
    }
}

impl StdError for RelayError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RelayError::MissingApiKey | RelayError::InvalidPort(_) => None,
            RelayError::Bind { source, .. } => Some(source),
            RelayError::Serve(source) => Some(source),
        }
    }
}

/// Read the provider key from the environment. Empty values count as missing.
pub fn api_key_from_env() -> Result<String, RelayError> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(RelayError::MissingApiKey)
}

/// Load `.env` from the working directory or one of its parents. Variables
/// already present in the process environment win over the file.
pub fn load_dotenv() -> Option<PathBuf> {
    report_dotenv(dotenvy::dotenv())
}

fn report_dotenv(loaded: dotenvy::Result<PathBuf>) -> Option<PathBuf> {
    match loaded {
        Ok(path) => {
            info!(path = %path.display(), "loaded environment file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable .env file");
            None
        }
    }
}

/// Host and port overrides layered on top of the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl BindOverrides {
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match read(PORT_ENV) {
            Some(value) => Some(
                value
                    .parse::<u16>()
                    .map_err(|_| RelayError::InvalidPort(value))?,
            ),
            None => None,
        };

        Ok(Self {
            host: read(HOST_ENV),
            port,
        })
    }
}

#[derive(Clone, Debug)]
pub struct RelaySettings {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamSettings,
}

impl RelaySettings {
    pub fn from_config(server: &ServerConfig, api_key: String) -> Self {
        Self {
            host: server.host().to_string(),
            port: server.port(),
            upstream: UpstreamSettings::from_config(server, api_key),
        }
    }

    pub fn with_overrides(mut self, overrides: BindOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct RelayState {
    client: reqwest::Client,
    upstream: Arc<UpstreamSettings>,
}

impl RelayState {
    pub fn new(client: reqwest::Client, upstream: UpstreamSettings) -> Self {
        Self {
            client,
            upstream: Arc::new(upstream),
        }
    }
}

pub fn router(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(settings: RelaySettings) -> Result<(), RelayError> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr: Option<SocketAddr> = listener.local_addr().ok();

    info!(
        addr = %local_addr.map(|a| a.to_string()).unwrap_or(addr),
        model = %settings.upstream.model,
        upstream = %settings.upstream.base_url,
        "starting relay server"
    );

    let state = RelayState::new(reqwest::Client::new(), settings.upstream);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(RelayError::Serve)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

async fn index() -> &'static str {
    WELCOME_TEXT
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// The body is parsed as JSON whatever the declared content type.
fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|message| message.as_str())
        .map(str::to_string)
}

async fn chat(State(state): State<RelayState>, body: Bytes) -> (StatusCode, Json<ChatReply>) {
    let Some(message) = extract_message(&body) else {
        warn!(payload = %String::from_utf8_lossy(&body), "invalid payload received");
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatReply::error(MISSING_MESSAGE_ERROR)),
        );
    };

    match complete_chat(&state.client, &state.upstream, &message).await {
        Ok(reply) => {
            info!(chars = reply.chars().count(), "chat request successful");
            debug!(%reply, "provider reply");
            (StatusCode::OK, Json(ChatReply::response(reply)))
        }
        Err(err) => {
            error!(error = %err, "chat completion failed");
            failure_reply(&err)
        }
    }
}

fn failure_reply(err: &UpstreamError) -> (StatusCode, Json<ChatReply>) {
    if err.is_insufficient_balance() {
        return (
            StatusCode::PAYMENT_REQUIRED,
            Json(ChatReply::error(INSUFFICIENT_BALANCE_ERROR)),
        );
    }

    match err {
        UpstreamError::Status { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatReply::error_with_details(API_ERROR, err.to_string())),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatReply::error_with_details(INTERNAL_ERROR, err.to_string())),
        ),
    }
}
