//! Command-line interface for Waymark
//!
//! Provides argument parsing and subcommand handling for the Waymark binary.

use clap::{Parser, Subcommand};

/// Goal-to-roadmap generation engine with provider fallback
#[derive(Parser)]
#[command(name = "waymark")]
#[command(version)]
#[command(about = "Goal-to-roadmap generation engine with provider fallback")]
#[command(
    long_about = "Waymark turns personal goals into structured, actionable roadmaps by \
    orchestrating text-generation providers, with deterministic category templates \
    guaranteeing a plan even when every provider is down."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Waymark Configuration
# =====================
#
# This file configures the HTTP server, text-generation providers, and
# observability settings for Waymark.

# ─────────────────────────────────────────────────────────────────────────────
# SERVER CONFIGURATION
# ─────────────────────────────────────────────────────────────────────────────

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 3000

# Transport timeout for provider requests, in seconds
request_timeout_seconds = 30

# ─────────────────────────────────────────────────────────────────────────────
# PROVIDERS
# ─────────────────────────────────────────────────────────────────────────────
#
# Each provider section is optional. Providers are tried in a fixed priority
# order: gemini first, then openai. With no provider configured at all,
# every roadmap comes from the built-in category templates (this is a valid
# setup, not an error).
#
# The api_key may also come from the environment: GEMINI_API_KEY or
# OPENAI_API_KEY. A key in this file takes precedence.

[providers.gemini]
# api_key = "your-gemini-key"
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-1.5-flash"

[providers.openai]
# api_key = "your-openai-key"
# base_url = "https://api.openai.com/v1"
# model = "gpt-4o-mini"

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"

# Prometheus metrics are always available at /metrics on the server port
"#
}
