//! Handler functions for caller-profile endpoints.

use axum::Json;

use crate::auth::{Claims, CurrentUser};

/// `GET /me`: echoes the verified claims of the caller.
pub async fn me(CurrentUser(claims): CurrentUser) -> Json<Claims> {
    Json(claims)
}
