//! Failure classification for fallback messaging
//!
//! Maps a provider/parse failure to one of two user-facing categories. The
//! classification selects which human-readable message is attached to the
//! eventual fallback plan - it never alters control flow (no retry is
//! triggered by either category).

use crate::error::AppError;

/// Substrings that identify rate limiting, matched case-insensitively
/// against the error's display output.
const RATE_LIMIT_TOKENS: &[&str] = &["429", "quota", "rate", "limit"];

/// User-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    Generic,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Generic => "generic",
        }
    }
}

/// Classify a failure by inspecting its rendered message
///
/// Message inspection is deliberate: rate limiting surfaces in many forms
/// (HTTP 429 statuses, "quota exceeded" bodies, "rate limit" phrases) and
/// the adapters fold all of them into the error display.
pub fn classify(error: &AppError) -> FailureKind {
    let message = error.to_string().to_lowercase();
    if RATE_LIMIT_TOKENS
        .iter()
        .any(|token| message.contains(token))
    {
        FailureKind::RateLimited
    } else {
        FailureKind::Generic
    }
}
