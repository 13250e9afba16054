// src/logging_middleware.rs
//! Middleware logging every inbound request

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::info;

/// Logs remote address, protocol, method and URI of each request.
///
/// Bodies are never logged since form posts carry passwords.
pub async fn log_request(request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_else(|| "-".to_string());

    info!(
        remote_addr = %remote_addr,
        proto = ?request.version(),
        method = %request.method(),
        uri = %request.uri(),
        "📥 Request"
    );

    next.run(request).await
}
