//! User account routes

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use super::middleware::require_authentication;

/// Creates the user account router
///
/// # Routes
/// - `GET|POST /user/signup` - Signup form and submission
/// - `GET|POST /user/login` - Login form and submission
/// - `POST /user/logout` - Logout (authenticated)
pub fn users_routes() -> Router {
    let protected = Router::new()
        .route("/user/logout", post(handlers::user_logout_post))
        .route_layer(middleware::from_fn(require_authentication));

    Router::new()
        .route(
            "/user/signup",
            get(handlers::user_signup).post(handlers::user_signup_post),
        )
        .route(
            "/user/login",
            get(handlers::user_login).post(handlers::user_login_post),
        )
        .merge(protected)
}
