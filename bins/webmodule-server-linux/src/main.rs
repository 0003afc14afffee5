//! Demo device web UI for Linux.
//!
//! Environment:
//! - `WEBMODULE_BIND` - listen address (default `0.0.0.0:8080`)
//! - `WEBMODULE_CONFIG` - JSON registry configuration replacing the demo one
//! - `WEBMODULE_TOKEN` - bearer token required on protected routes
//! - `RUST_LOG` - log filter

mod demo;

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webmodule_core::{Registry, RegistryConfig};
use webmodule_web::{create_router, BearerTokenGate, ServerState};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,webmodule_web=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("webmodule server starting...");

    // Configuration
    let bind = std::env::var("WEBMODULE_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid WEBMODULE_BIND address: {}", bind))?;

    let mut registry = Registry::new();
    match std::env::var("WEBMODULE_CONFIG") {
        Ok(path) => {
            let config = RegistryConfig::from_path(&path)?;
            registry.apply_config(config);
            tracing::info!("Registry configured from {}", path);
        }
        Err(_) => demo::configure_registry(&mut registry),
    }

    let mut state = ServerState::new(registry);
    if let Ok(token) = std::env::var("WEBMODULE_TOKEN") {
        tracing::info!("Protected routes require a bearer token");
        state = state.with_auth_gate(BearerTokenGate::new(token));
    }

    state.mount("/main", &demo::MainModule);
    state.mount("/settings", &demo::SettingsModule::new("webmodule-device"));
    state.mount("", &demo::ExampleModule::new());

    let statistics = state.statistics();
    let app = create_router(state.into_shared());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("🚀 webmodule server ready on http://{}", addr);
    tracing::info!("");
    tracing::info!("Try these commands:");
    tracing::info!("   curl -i http://localhost:{}/", addr.port());
    tracing::info!("   curl http://localhost:{}/api/status", addr.port());
    tracing::info!("   curl -X POST http://localhost:{}/api/led/toggle", addr.port());
    tracing::info!("   curl http://localhost:{}/assets/style.css", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let snapshot = statistics.snapshot();
    tracing::info!(
        requests = snapshot.requests,
        redirects = snapshot.redirects,
        assets = snapshot.assets_served,
        routes = snapshot.routes_handled,
        errors = snapshot.errors,
        uptime = snapshot.uptime,
        "Shutdown complete"
    );
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down..."),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
