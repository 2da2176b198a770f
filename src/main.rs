//! Waymark HTTP server
//!
//! Starts an Axum web server exposing the roadmap generation engine.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

use waymark::cli::{Cli, Command};
use waymark::config::Config;
use waymark::engine::RoadmapEngine;
use waymark::handlers::{self, AppState};
use waymark::metrics::Metrics;
use waymark::providers;
use waymark::store::InMemoryStore;
use waymark::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = &cli.command {
        let template = waymark::cli::generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(path, template)?;
                println!("Wrote configuration template to {path}");
            }
            None => print!("{template}"),
        }
        return Ok(());
    }

    let config = Config::from_file(&cli.config)?;

    telemetry::init(&config.observability.log_level);

    let adapters = providers::build_providers(&config)?;
    if adapters.is_empty() {
        tracing::warn!(
            "No provider credentials found; all roadmaps will come from fallback templates"
        );
    } else {
        let names: Vec<&str> = adapters.iter().map(|a| a.id().as_str()).collect();
        tracing::info!(providers = ?names, "Provider candidates resolved");
    }

    let metrics = Metrics::new()?;
    let store = Arc::new(InMemoryStore::new());
    let engine = Arc::new(RoadmapEngine::new(
        adapters,
        store.clone(),
        store.clone(),
        store.clone(),
        metrics.clone(),
    ));

    let state = AppState {
        engine,
        store,
        metrics,
    };
    let app = handlers::build_router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.server.port,
    ));

    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
