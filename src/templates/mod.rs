//! # Templates Module
//!
//! Server-rendered HTML pages built with maud.

pub mod pages;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, NaiveDateTime, Utc};
use maud::{html, Markup, DOCTYPE};

use crate::sessions::{Session, FLASH_KEY};
use crate::users::AuthStatus;

pub use pages::{create_page, home_page, login_page, signup_page, view_page};

/// Data shared by every page layout
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
}

impl TemplateData {
    /// Pops the pending flash message, if any, out of the session
    pub fn new(session: &Session, auth: AuthStatus) -> Self {
        Self {
            current_year: Utc::now().year(),
            flash: session.pop_string(FLASH_KEY),
            is_authenticated: auth.is_authenticated(),
        }
    }
}

/// Formats a UTC timestamp as `02 Jan 2006 at 15:04`
pub fn human_date(t: NaiveDateTime) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

pub fn render(status: StatusCode, page: Markup) -> Response {
    (status, Html(page.into_string())).into_response()
}

fn layout(data: &TemplateData, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - Snippetbox" }
                link rel="stylesheet" href="/static/css/main.css";
            }
            body {
                header {
                    h1 { a href="/" { "Snippetbox" } }
                }
                nav {
                    div {
                        a href="/" { "Home" }
                        @if data.is_authenticated {
                            a href="/snippet/create" { "Create snippet" }
                        }
                    }
                    div {
                        @if data.is_authenticated {
                            form action="/user/logout" method="POST" {
                                button { "Logout" }
                            }
                        } @else {
                            a href="/user/signup" { "Signup" }
                            a href="/user/login" { "Login" }
                        }
                    }
                }
                main {
                    @if let Some(flash) = &data.flash {
                        div.flash { (flash) }
                    }
                    (content)
                }
                footer {
                    "Powered by " a href="https://www.rust-lang.org/" { "Rust" } " in " (data.current_year)
                }
            }
        }
    }
}
