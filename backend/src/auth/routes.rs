//! Defines the HTTP routes specifically for authentication.
//!
//! These routes are anonymous; they are merged into the main router outside
//! the bearer-token layer.

use axum::{routing::post, Router};

use super::handlers::login;
use crate::state::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
