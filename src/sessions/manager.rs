// src/sessions/manager.rs
//! Session loading, committing and the cookie-carrying middleware

use axum::{
    extract::{Extension, Request},
    http::{
        header::{COOKIE, SET_COOKIE, VARY},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::session::Session;
use super::store::{SessionError, SessionRecord, SessionStore};
use crate::common::AppError;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    lifetime: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, lifetime: Duration) -> Self {
        Self { store, lifetime }
    }

    /// Loads the session named by `token`, falling back to an empty one when
    /// the token is absent, unknown or expired.
    pub async fn load(&self, token: Option<&str>) -> Result<Session, SessionError> {
        let Some(token) = token else {
            return Ok(Session::new(self.store.clone(), None, HashMap::new()));
        };

        match self.store.find(token).await? {
            Some(record) => Ok(Session::new(
                self.store.clone(),
                Some(token.to_string()),
                record.values,
            )),
            None => {
                debug!("Session token not found or expired, starting fresh session");
                Ok(Session::new(self.store.clone(), None, HashMap::new()))
            }
        }
    }

    /// Persists a modified session and returns the cookie to send back.
    pub async fn commit(&self, session: &Session) -> Result<Option<String>, SessionError> {
        let Some((token, values)) = session.take_changes() else {
            return Ok(None);
        };

        let record = SessionRecord {
            values,
            expires_at: Utc::now() + self.lifetime,
        };
        self.store.commit(&token, &record).await?;

        Ok(Some(self.cookie(&token)))
    }

    fn cookie(&self, token: &str) -> String {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(cookie::time::Duration::seconds(self.lifetime.num_seconds()))
            .build()
            .to_string()
    }
}

/// Value of cookie `name` across every `Cookie` header
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Middleware loading the session before the handler and saving it after
pub async fn load_and_save(
    Extension(manager): Extension<SessionManager>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie_value(request.headers(), SESSION_COOKIE);

    let session = match manager.load(token.as_deref()).await {
        Ok(session) => session,
        Err(e) => return AppError::from(e).into_response(),
    };
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    match manager.commit(&session).await {
        Ok(Some(cookie)) => match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
                response
                    .headers_mut()
                    .append(VARY, HeaderValue::from_static("Cookie"));
            }
            Err(e) => {
                return AppError::InternalServer(format!("invalid session cookie: {}", e))
                    .into_response()
            }
        },
        Ok(None) => {}
        Err(e) => return AppError::from(e).into_response(),
    }

    response
}
