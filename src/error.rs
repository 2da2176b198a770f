//! Error types for Waymark
//!
//! All errors implement `IntoResponse` for Axum handlers.
//!
//! The taxonomy mirrors the engine's recovery policy: `GoalNotFound` is the
//! only failure that aborts before a plan is attempted, `Persistence` is the
//! only failure surfaced after a plan exists, and everything in between
//! (`Provider`, `Parse`) is absorbed by the orchestrator and converted into
//! a fallback plan.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Goal {0} not found")]
    GoalNotFound(Uuid),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to persist roadmap for goal {goal_id}: {reason}")]
    Persistence { goal_id: Uuid, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure raised by a provider adapter while requesting a completion
///
/// Adapters never return empty or malformed text silently - every transport
/// problem, non-2xx status, and empty completion becomes one of these
/// variants. The `Display` output deliberately carries the HTTP status code
/// so the failure classifier can recognize rate limiting (`429`) by message
/// inspection alone.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request never produced an HTTP response (DNS, connect, TLS, timeout)
    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Provider answered 2xx but the response envelope carried no text
    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: &'static str },

    /// Provider answered 2xx but the response envelope could not be decoded
    #[error("{provider} returned an unreadable response envelope: {reason}")]
    MalformedEnvelope {
        provider: &'static str,
        reason: String,
    },
}

/// Failure raised while turning raw provider text into a validated payload
#[derive(Error, Debug)]
pub enum ParseError {
    /// No balanced JSON object could be located in the raw text
    #[error("no JSON object found in provider output ({scanned} bytes scanned)")]
    Extraction { scanned: usize },

    /// A candidate object was located but is not valid JSON
    #[error("provider output contained malformed JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// The decoded payload does not have the required plan shape
    #[error("provider payload failed schema validation: {reason}")]
    Schema { reason: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::GoalNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::Provider(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            Self::Parse(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            Self::Persistence { .. } => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
