//! # Snippets Module
//!
//! Creating, viewing and listing text snippets:
//! - Snippet model and creation form
//! - Form validation policy
//! - SQLite-backed repository

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::snippets_routes;
pub use services::{SnippetRepository, SnippetsService};
