//! Text-generation provider adapters
//!
//! Each adapter wraps the transport and auth details of one external service
//! behind the uniform [`RoadmapProvider`] contract. Adapters are selected via
//! an explicit priority list built by [`resolve_available`] - there is no
//! global "current provider" state.

pub mod gemini;
pub mod openai;
pub mod prompt;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProvidersConfig;
use crate::error::ProviderError;
use crate::goal::GoalDescriptor;

/// Identifier of a configured provider, in fixed priority order
///
/// The declaration order is the availability resolver's priority order:
/// Gemini (cheapest/fastest) is tried before OpenAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    Openai,
}

impl ProviderId {
    /// All providers in priority order
    pub const PRIORITY_ORDER: [ProviderId; 2] = [ProviderId::Gemini, ProviderId::Openai];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Openai => "openai",
        }
    }

    /// Environment variable consulted when the config file has no api_key
    pub fn env_key(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Openai => "OPENAI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Openai => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::Openai => "gpt-4o-mini",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform contract for one external text-generation service
///
/// `generate` must build a deterministic prompt from the goal and return the
/// provider's raw completion text. Failure (timeout, auth error, quota,
/// provider-side error, empty completion) is always raised as a typed
/// [`ProviderError`] - an adapter never silently returns unusable text.
#[async_trait]
pub trait RoadmapProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn generate(&self, goal: &GoalDescriptor) -> Result<String, ProviderError>;
}

/// Resolve the ordered list of usable providers
///
/// Inspects credential presence (config file overlaid with environment) for
/// each provider in [`ProviderId::PRIORITY_ORDER`]. An empty result is a
/// valid, expected outcome - it signals the orchestrator to go straight to
/// the fallback templates, not an error path.
pub fn resolve_available(providers: &ProvidersConfig) -> Vec<ProviderId> {
    ProviderId::PRIORITY_ORDER
        .into_iter()
        .filter(|id| providers.resolve(*id).is_some())
        .collect()
}

/// Build concrete adapters for every available provider, in priority order
pub fn build_providers(
    config: &crate::config::Config,
) -> crate::error::AppResult<Vec<std::sync::Arc<dyn RoadmapProvider>>> {
    let timeout = config.server.request_timeout_seconds;
    let mut adapters: Vec<std::sync::Arc<dyn RoadmapProvider>> = Vec::new();

    for id in resolve_available(&config.providers) {
        // resolve() succeeded during availability resolution; settings are present
        let settings = match config.providers.resolve(id) {
            Some(settings) => settings,
            None => continue,
        };
        let adapter: std::sync::Arc<dyn RoadmapProvider> = match id {
            ProviderId::Gemini => std::sync::Arc::new(GeminiProvider::new(settings, timeout)?),
            ProviderId::Openai => std::sync::Arc::new(OpenAiProvider::new(settings, timeout)?),
        };
        adapters.push(adapter);
    }

    Ok(adapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::config::Config;

    fn config_with(gemini: bool, openai: bool) -> Config {
        let mut toml = String::from("[server]\nhost = \"127.0.0.1\"\nport = 8080\n");
        if gemini {
            toml.push_str("[providers.gemini]\napi_key = \"g\"\n");
        }
        if openai {
            toml.push_str("[providers.openai]\napi_key = \"o\"\n");
        }
        Config::from_str(&toml).unwrap()
    }

    fn env_is_clean() -> bool {
        std::env::var(ProviderId::Gemini.env_key()).is_err()
            && std::env::var(ProviderId::Openai.env_key()).is_err()
    }

    #[test]
    fn both_configured_yields_priority_order() {
        let config = config_with(true, true);
        assert_eq!(
            resolve_available(&config.providers),
            vec![ProviderId::Gemini, ProviderId::Openai]
        );
    }

    #[test]
    fn single_provider_yields_single_candidate() {
        if !env_is_clean() {
            return;
        }
        let config = config_with(false, true);
        assert_eq!(
            resolve_available(&config.providers),
            vec![ProviderId::Openai]
        );
    }

    #[test]
    fn no_credentials_yields_empty_list() {
        if !env_is_clean() {
            return;
        }
        let config = config_with(false, false);
        assert!(resolve_available(&config.providers).is_empty());
    }

    #[test]
    fn provider_id_display_matches_wire_label() {
        assert_eq!(ProviderId::Gemini.to_string(), "gemini");
        assert_eq!(ProviderId::Openai.to_string(), "openai");
        assert_eq!(
            serde_json::to_string(&ProviderId::Gemini).unwrap(),
            r#""gemini""#
        );
    }
}
