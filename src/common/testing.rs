//! Test doubles and request helpers shared by handler tests

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use cookie::Cookie;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{AppState, ModelError};
use crate::app::build_router;
use crate::sessions::manager::SESSION_COOKIE;
use crate::sessions::store::SessionRecord;
use crate::sessions::{MemorySessionStore, SessionManager, SessionStore, AUTH_USER_KEY};
use crate::snippets::models::Snippet;
use crate::snippets::SnippetRepository;
use crate::users::UserRepository;

pub const VALID_EMAIL: &str = "alice@example.com";
pub const VALID_PASSWORD: &str = "pa$$word";
pub const DUPLICATE_EMAIL: &str = "dupe@example.com";
pub const AUTH_TOKEN: &str = "authenticated-token";

pub fn mock_snippet() -> Snippet {
    let created = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    Snippet {
        id: 1,
        title: "An old silent pond".to_string(),
        content: "An old silent pond...".to_string(),
        created,
        expires: created + Duration::days(365),
    }
}

/// Snippet repository holding one fixed snippet and counting inserts
#[derive(Default)]
pub struct MockSnippets {
    pub inserts: AtomicUsize,
}

impl MockSnippets {
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnippetRepository for MockSnippets {
    async fn insert(&self, _title: &str, _content: &str, _expires: i64) -> Result<i64, ModelError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(2)
    }

    async fn get(&self, id: i64) -> Result<Snippet, ModelError> {
        match id {
            1 => Ok(mock_snippet()),
            _ => Err(ModelError::NoRecord),
        }
    }

    async fn latest(&self) -> Result<Vec<Snippet>, ModelError> {
        Ok(vec![mock_snippet()])
    }
}

/// User repository with one known account and one taken email address
#[derive(Default)]
pub struct MockUsers {
    pub inserts: AtomicUsize,
}

#[async_trait]
impl UserRepository for MockUsers {
    async fn insert(&self, _name: &str, email: &str, _password: &str) -> Result<(), ModelError> {
        if email == DUPLICATE_EMAIL {
            return Err(ModelError::DuplicateEmail);
        }
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<i64, ModelError> {
        if email == VALID_EMAIL && password == VALID_PASSWORD {
            Ok(1)
        } else {
            Err(ModelError::InvalidCredentials)
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, ModelError> {
        Ok(id == 1)
    }
}

/// Router wired to mocks, plus handles for inspecting them
pub struct TestApp {
    pub router: Router,
    pub snippets: Arc<MockSnippets>,
    pub users: Arc<MockUsers>,
    pub sessions: MemorySessionStore,
}

impl TestApp {
    pub fn new() -> Self {
        let snippets = Arc::new(MockSnippets::default());
        let users = Arc::new(MockUsers::default());
        let sessions = MemorySessionStore::new();

        let state = AppState {
            snippets: snippets.clone(),
            users: users.clone(),
            sessions: SessionManager::new(Arc::new(sessions.clone()), Duration::hours(12)),
        };

        Self {
            router: build_router(Arc::new(state), Path::new("./ui/static")),
            snippets,
            users,
            sessions,
        }
    }

    /// Seeds a logged-in session and returns the matching `Cookie` header
    pub async fn login_cookie(&self) -> String {
        let record = SessionRecord {
            values: HashMap::from([(AUTH_USER_KEY.to_string(), 1.into())]),
            expires_at: Utc::now() + Duration::hours(1),
        };
        self.sessions.commit(AUTH_TOKEN, &record).await.unwrap();
        format!("session={}", AUTH_TOKEN)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Session token carried by the response's `Set-Cookie` header, if any
pub fn session_token(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| Cookie::parse(c).ok())
        .filter(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
}
