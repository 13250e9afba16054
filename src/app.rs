// src/app.rs
//! Router composition

use axum::{extract::Extension, middleware, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::common::{AppError, AppState};
use crate::logging_middleware::log_request;
use crate::security_middleware::secure_headers;
use crate::sessions::load_and_save;
use crate::users::middleware::authenticate;
use crate::{snippets, users};

/// GET /ping
async fn ping() -> &'static str {
    "OK"
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Builds the full application router around `state`
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // ========================================================================
    // DYNAMIC ROUTES (session + authentication aware)
    // ========================================================================

    let dynamic = Router::new()
        .merge(snippets::snippets_routes())
        .merge(users::users_routes())
        .layer(middleware::from_fn(authenticate))
        .layer(middleware::from_fn(load_and_save))
        .layer(Extension(state.sessions.clone()));

    // ========================================================================
    // STANDARD LAYERS
    // ========================================================================

    Router::new()
        .route("/ping", get(ping))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(dynamic)
        .fallback(not_found)
        .layer(Extension(state))
        .layer(middleware::from_fn(secure_headers))
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}
