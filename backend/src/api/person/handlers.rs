//! Handler functions for the person registry API.
//!
//! These functions translate HTTP requests into [`PersonRegistry`] calls and
//! shape the responses; all business rules live in the registry.
//!
//! [`PersonRegistry`]: crate::services::PersonRegistry

use adapters::Person;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::auth::CurrentUser;
use crate::errors::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub async fn list_persons(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(state.registry.list().await?))
}

/// `GET /persons/{key}`: an integer key is an id, anything else a region code.
pub async fn get_person_or_region(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<Response> {
    match key.parse::<i64>() {
        Ok(id) => Ok(Json(state.registry.get(id).await?).into_response()),
        Err(_) => Ok(Json(state.registry.list_by_region(&key).await?).into_response()),
    }
}

pub async fn create_person(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiJson(person): ApiJson<Person>,
) -> ApiResult<Response> {
    let created = state.registry.create(person).await?;
    debug!(id = created.id, by = %claims.sub, "created person");
    let location = format!("/persons/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

pub async fn update_person(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(person): ApiJson<Person>,
) -> ApiResult<Json<Person>> {
    let updated = state.registry.update(id, person).await?;
    debug!(id, by = %claims.sub, "updated person");
    Ok(Json(updated))
}

pub async fn delete_person(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Person>> {
    let removed = state.registry.delete(id).await?;
    debug!(id, by = %claims.sub, "deleted person");
    Ok(Json(removed))
}
