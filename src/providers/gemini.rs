//! Gemini provider adapter
//!
//! Wraps the Google Generative Language API (`generateContent`). First in
//! the availability resolver's priority order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ResolvedProvider;
use crate::error::ProviderError;
use crate::goal::GoalDescriptor;
use crate::providers::{prompt, ProviderId, RoadmapProvider};

/// Fixed moderate temperature - biases toward structural compliance over
/// creativity so the payload survives schema validation.
const GENERATION_TEMPERATURE: f32 = 0.4;

/// Bound on completion size; a valid plan fits comfortably under this.
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Cap on error body preview carried in ProviderError::Status
const MAX_ERROR_BODY: usize = 300;

pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiProvider {
    /// Create an adapter from resolved settings
    ///
    /// The transport timeout is the engine's only timeout enforcement - the
    /// orchestrator itself never races or cancels a provider call.
    pub fn new(settings: ResolvedProvider, timeout_seconds: u64) -> crate::error::AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                crate::error::AppError::Config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl RoadmapProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, goal: &GoalDescriptor) -> Result<String, ProviderError> {
        let prompt = prompt::build_prompt(goal);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        tracing::debug!(
            provider = %self.id(),
            model = %self.model,
            prompt_length = prompt.len(),
            "Requesting roadmap completion"
        );

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: "gemini",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(ProviderError::Status {
                provider: "gemini",
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedEnvelope {
                    provider: "gemini",
                    reason: e.to_string(),
                })?;

        let text = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyCompletion { provider: "gemini" });
        }

        Ok(text)
    }
}
