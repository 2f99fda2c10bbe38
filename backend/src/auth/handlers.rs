//! Handler functions for authentication-related API endpoints.

use axum::{extract::State, Json};

use super::errors::AuthError;
use super::models::{LoginRequest, LoginResponse};
use crate::extract::ApiJson;
use crate::state::AppState;

/// `POST /login`: exchanges a username/password pair for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = state
        .tokens
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(response))
}
