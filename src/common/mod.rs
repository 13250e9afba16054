// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod form;
pub mod helpers;
pub mod migrations;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types for convenience
pub use error::{AppError, ModelError};
pub use form::{BoundForm, FormBinding, FormField};
pub use helpers::safe_email_log;
pub use state::AppState;
pub use validation::Validator;
