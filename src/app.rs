//! Application state and router construction.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::store::UserStore;
use crate::flash::FlashStore;
use crate::handlers::home::{home_handler, login_page_handler};
use crate::handlers::register::register_handler;
use crate::handlers::users::{list_users_handler, view_user_handler};
use crate::session::SessionStore;

/// Per-request collaborators, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub sessions: Arc<SessionStore>,
    pub flash: Arc<FlashStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        AppState {
            store,
            sessions: Arc::new(SessionStore::new()),
            flash: Arc::new(FlashStore::new()),
        }
    }
}

/// Builds the router with all routes and middleware layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/users", get(list_users_handler).post(register_handler))
        .route("/users/:login", get(view_user_handler))
        .route("/login", get(login_page_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers(Any),
        )
        .with_state(state)
}
