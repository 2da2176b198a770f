//! Configuration management for Waymark
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Provider credentials may come from the config file or from the
//! environment (`GEMINI_API_KEY`, `OPENAI_API_KEY`); a provider with no
//! resolvable key is simply unavailable, which is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::providers::ProviderId;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// Provider credential configuration
///
/// Each provider section is optional. Absence of a section (and of the
/// corresponding environment variable) means the provider is not configured,
/// which routes generation straight to the fallback templates.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    gemini: Option<ProviderSettings>,
    openai: Option<ProviderSettings>,
}

/// Settings for one provider
///
/// Fields are private to enforce access through [`ProvidersConfig::resolve`],
/// which overlays environment credentials and fills provider defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderSettings {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

/// Fully resolved settings for one usable provider
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl ProvidersConfig {
    /// Resolve the settings for a provider, overlaying environment credentials
    ///
    /// Resolution order for the API key: config file first, then the
    /// provider's environment variable. Returns `None` when neither is set -
    /// the availability resolver treats that as "provider not configured".
    pub fn resolve(&self, id: ProviderId) -> Option<ResolvedProvider> {
        let settings = match id {
            ProviderId::Gemini => self.gemini.as_ref(),
            ProviderId::Openai => self.openai.as_ref(),
        };

        let api_key = settings
            .and_then(|s| s.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(id.env_key()).ok().filter(|k| !k.trim().is_empty()))?;

        Some(ResolvedProvider {
            api_key,
            base_url: settings
                .and_then(|s| s.base_url.clone())
                .unwrap_or_else(|| id.default_base_url().to_string()),
            model: settings
                .and_then(|s| s.model.clone())
                .unwrap_or_else(|| id.default_model().to_string()),
        })
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            crate::error::AppError::Config(format!(
                "failed to read config file '{path_display}': {source}"
            ))
        })?;

        content.parse()
    }

    /// Validate configuration after parsing
    ///
    /// Called automatically by `from_file()` and `from_str()`, but can also
    /// be invoked explicitly when constructing Config via other means.
    pub fn validate(&self) -> crate::error::AppResult<()> {
        if self.server.request_timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "Configuration error: request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > 300 {
            return Err(crate::error::AppError::Config(format!(
                "Configuration error: request_timeout_seconds cannot exceed 300 seconds, got {}",
                self.server.request_timeout_seconds
            )));
        }

        // Validate base_url overrides when a provider section is present
        for (name, settings) in [
            ("gemini", self.providers.gemini.as_ref()),
            ("openai", self.providers.openai.as_ref()),
        ] {
            if let Some(base_url) = settings.and_then(|s| s.base_url.as_deref()) {
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(crate::error::AppError::Config(format!(
                        "Configuration error: providers.{name}.base_url '{base_url}' must start \
                         with 'http://' or 'https://'."
                    )));
                }
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = crate::error::AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|source| crate::error::AppError::Config(format!("invalid TOML: {source}")))?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
request_timeout_seconds = 30

[providers.gemini]
api_key = "test-gemini-key"

[providers.openai]
api_key = "test-openai-key"
base_url = "http://localhost:9090/v1"
model = "gpt-4o-mini"

[observability]
log_level = "info"
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn resolves_provider_from_config_key() {
        let config = Config::from_str(TEST_CONFIG).unwrap();

        let gemini = config.providers.resolve(ProviderId::Gemini).unwrap();
        assert_eq!(gemini.api_key, "test-gemini-key");
        assert_eq!(gemini.base_url, ProviderId::Gemini.default_base_url());
        assert_eq!(gemini.model, ProviderId::Gemini.default_model());

        let openai = config.providers.resolve(ProviderId::Openai).unwrap();
        assert_eq!(openai.base_url, "http://localhost:9090/v1");
        assert_eq!(openai.model, "gpt-4o-mini");
    }

    #[test]
    fn missing_providers_section_resolves_to_none() {
        let config = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080
"#,
        )
        .unwrap();

        // No config key; environment may still supply one, so clear it for
        // this assertion to be meaningful.
        if std::env::var(ProviderId::Gemini.env_key()).is_err() {
            assert!(config.providers.resolve(ProviderId::Gemini).is_none());
        }
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let config = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[providers.openai]
api_key = "   "
"#,
        )
        .unwrap();

        if std::env::var(ProviderId::Openai.env_key()).is_err() {
            assert!(config.providers.resolve(ProviderId::Openai).is_none());
        }
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let result = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout_seconds = 0
"#,
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("request_timeout_seconds"));
    }

    #[test]
    fn excessive_timeout_fails_validation() {
        let result = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout_seconds = 301
"#,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("300"));
    }

    #[test]
    fn invalid_base_url_fails_validation() {
        let result = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[providers.gemini]
api_key = "k"
base_url = "ftp://nope"
"#,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        let config = Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(config.server.request_timeout_seconds, 30);
    }
}
