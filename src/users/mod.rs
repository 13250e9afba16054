//! # Users Module
//!
//! Account signup, login and logout:
//! - Signup and login forms with validation policies
//! - Argon2-hashed credentials in SQLite
//! - Session-backed authentication middleware and extractor

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use extractors::AuthStatus;
pub use routes::users_routes;
pub use services::{UserRepository, UsersService};
