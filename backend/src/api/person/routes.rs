//! Defines the HTTP routes for the person registry.

use axum::{routing::get, Router};

use super::handlers::{create_person, delete_person, get_person_or_region, list_persons, update_person};
use crate::state::AppState;

pub fn person_router() -> Router<AppState> {
    Router::new()
        .route("/persons", get(list_persons).post(create_person))
        .route(
            "/persons/:id",
            get(get_person_or_region)
                .put(update_person)
                .delete(delete_person),
        )
}
