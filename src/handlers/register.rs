//! HTTP layer for user registration.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;

use crate::app::AppState;
use crate::db::users::UserForm;
use crate::handlers::register_logic::{process_registration, Disposition};
use crate::session::{new_session_id, session_id, SESSION_COOKIE};
use crate::utils::errors::ApiError;

/// Handler for `POST /users`.
///
/// Failure renders the designated fallback page with the accumulated field
/// errors; success stores a flash notice for the caller's session and
/// redirects to the login page.
pub async fn register_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<UserForm>,
) -> Result<Response, ApiError> {
    match process_registration(state.store.as_ref(), form)? {
        Disposition::Failure { page, errors } => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "page": page, "errors": errors })),
        )
            .into_response()),
        Disposition::Success { redirect_to, notice } => {
            // The flash store is keyed by the session cookie; issue one when
            // absent so the next page load can claim the notice.
            let (sid, issued) = match session_id(&headers) {
                Some(sid) => (sid, false),
                None => (new_session_id(), true),
            };
            state.flash.set(&sid, notice);

            let redirect = Redirect::to(redirect_to);
            if issued {
                let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, sid);
                Ok(([(header::SET_COOKIE, cookie)], redirect).into_response())
            } else {
                Ok(redirect.into_response())
            }
        }
    }
}
