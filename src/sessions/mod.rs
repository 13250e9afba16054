//! # Sessions Module
//!
//! Cookie-keyed server-side sessions:
//! - `SessionStore` trait with SQLite and in-memory backends
//! - `Session` request handle (put / pop / remove / renew)
//! - `load_and_save` middleware committing changes and setting the cookie

pub mod manager;
pub mod memory;
pub mod session;
pub mod sqlite;
pub mod store;

pub use manager::{load_and_save, SessionManager};
pub use memory::MemorySessionStore;
pub use session::Session;
pub use sqlite::SqliteSessionStore;
pub use store::{SessionError, SessionStore};

/// Session key holding a one-shot message for the next page
pub const FLASH_KEY: &str = "flash";

/// Session key holding the logged-in user's id
pub const AUTH_USER_KEY: &str = "authenticatedUserID";
