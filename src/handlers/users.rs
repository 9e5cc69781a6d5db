//! Listing and viewing users.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app::AppState;
use crate::utils::errors::ApiError;

/// Handler for `GET /users`.
///
/// A store reporting absence yields an empty list, never a missing value.
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state.store.list_all()?.unwrap_or_default();
    Ok(Json(json!({ "users": users })).into_response())
}

/// Handler for `GET /users/:login`. Unknown logins yield 404.
pub async fn view_user_handler(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.find(&login)? {
        Some(user) => Ok(Json(json!({ "user": user })).into_response()),
        None => Err(ApiError::not_found("User")),
    }
}
