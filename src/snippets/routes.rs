//! Snippet routes

use axum::{middleware, routing::get, Router};

use super::handlers;
use crate::users::middleware::require_authentication;

/// Creates the snippets router
///
/// # Routes
/// - `GET /` - Latest snippets
/// - `GET /snippet/view/:id` - Single snippet
/// - `GET /snippet/create` - Creation form (authenticated)
/// - `POST /snippet/create` - Create snippet (authenticated)
pub fn snippets_routes() -> Router {
    let protected = Router::new()
        .route(
            "/snippet/create",
            get(handlers::snippet_create).post(handlers::snippet_create_post),
        )
        .route_layer(middleware::from_fn(require_authentication));

    Router::new()
        .route("/", get(handlers::home))
        .route("/snippet/view/:id", get(handlers::snippet_view))
        .merge(protected)
}
