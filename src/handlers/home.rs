//! Home and login page view data.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::app::AppState;
use crate::enums::MusicType;
use crate::handlers::register_logic::LOGIN_PAGE;
use crate::session::session_id;
use crate::utils::errors::ApiError;

/// Handler for `GET /`.
///
/// Resolves the logged-in user from the session, refreshes the snapshot from
/// the store, and exposes it together with the music categories. Without a
/// session the user is simply null; authentication is not this service's
/// concern.
pub async fn home_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let current = session_id(&headers)
        .and_then(|sid| state.sessions.current(&sid).map(|user| (sid, user)));

    let user = match current {
        Some((sid, mut user)) => {
            state.store.refresh(&mut user)?;
            state.sessions.update(&sid, user.clone());
            Some(user)
        }
        None => None,
    };

    Ok(Json(json!({ "music_types": MusicType::values(), "user": user })).into_response())
}

/// Handler for `GET /login`.
///
/// Claims the caller's flash notice, if one survived a redirect here.
pub async fn login_page_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let notice = session_id(&headers).and_then(|sid| state.flash.take(&sid));
    Json(json!({ "page": LOGIN_PAGE, "notice": notice })).into_response()
}
