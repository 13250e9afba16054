//! Authentication middleware

use axum::{
    extract::{Extension, Request},
    http::{header::CACHE_CONTROL, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::extractors::AuthStatus;
use crate::common::{AppError, AppState};
use crate::sessions::{Session, AUTH_USER_KEY};

/// Resolves the session's user id against the user store and records the
/// outcome as an [`AuthStatus`] request extension.
///
/// A session pointing at a deleted account is treated as anonymous.
pub async fn authenticate(
    Extension(state): Extension<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = request
        .extensions()
        .get::<Session>()
        .and_then(|session| session.get_i64(AUTH_USER_KEY));

    let mut status = AuthStatus::default();
    if let Some(id) = user_id {
        if state.users.exists(id).await? {
            status.user_id = Some(id);
        } else {
            warn!(user_id = id, "Session references unknown user");
        }
    }

    request.extensions_mut().insert(status);
    Ok(next.run(request).await)
}

/// Redirects anonymous visitors to the login page and marks protected
/// responses as uncacheable
pub async fn require_authentication(auth: AuthStatus, request: Request, next: Next) -> Response {
    if !auth.is_authenticated() {
        debug!(uri = %request.uri(), "Anonymous request to protected route");
        return Redirect::to("/user/login").into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
