//! OpenAI provider adapter
//!
//! Wraps the chat completions API. Second in the availability resolver's
//! priority order; tried only after Gemini fails or is unconfigured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ResolvedProvider;
use crate::error::ProviderError;
use crate::goal::GoalDescriptor;
use crate::providers::{prompt, ProviderId, RoadmapProvider};

// Same generation constraints as the Gemini adapter: failover must not
// change the character of the output.
const GENERATION_TEMPERATURE: f32 = 0.4;
const MAX_COMPLETION_TOKENS: u32 = 2048;
const MAX_ERROR_BODY: usize = 300;

pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiProvider {
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
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl RoadmapProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Openai
    }

    async fn generate(&self, goal: &GoalDescriptor) -> Result<String, ProviderError> {
        let prompt = prompt::build_prompt(goal);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: GENERATION_TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
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
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: "openai",
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
                provider: "openai",
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedEnvelope {
                    provider: "openai",
                    reason: e.to_string(),
                })?;

        let text = envelope
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyCompletion { provider: "openai" });
        }

        Ok(text)
    }
}
