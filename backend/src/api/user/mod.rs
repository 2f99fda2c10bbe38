//! Module for caller-profile endpoints.
//!
//! Exposes what the service knows about the authenticated caller, which is
//! exactly the verified token claims.

pub mod handlers;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new().route("/me", get(handlers::me))
}
