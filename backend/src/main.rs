//! Main entry point for the persons backend.
//!
//! This file initializes logging and configuration, builds the stores and the
//! token service, registers all routes and middleware, and serves the Axum app
//! until Ctrl-C.

mod api;
mod auth;
mod config;
mod errors;
mod extract;
mod middleware;
mod services;
mod state;

use std::sync::Arc;

use adapters::{MemoryCredentialStore, MemoryPersonStore};
use anyhow::{Context, Result};
use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Args};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().parse_lossy(&config.log_level))
        .with_target(true)
        .init();

    let credentials = MemoryCredentialStore::new(config.users.clone())
        .context("invalid user configuration")?;
    info!(
        users = credentials.len(),
        key_id = %config.auth.key_id,
        retired_keys = config.auth.retired_keys.len(),
        "authentication configured"
    );

    let state = AppState::new(
        Arc::new(MemoryPersonStore::new()),
        Arc::new(credentials),
        config.key_set(),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!("listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

/// Login and health are anonymous; everything else sits behind the bearer-token gate.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(api::person::routes::person_router())
        .merge(api::user::user_router())
        .route_layer(from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(auth::auth_router())
        .merge(protected)
        .layer(middleware::trace_layer())
        .layer(middleware::cors_layer())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
