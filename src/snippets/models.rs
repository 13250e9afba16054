//! Snippet data models

use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::common::{FormBinding, FormField, Validator};

/// Permitted lifetimes for a new snippet, in days
pub const EXPIRY_OPTIONS: [i64; 3] = [1, 7, 365];

/// Snippet database model; timestamps are UTC
#[derive(Debug, Clone, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: NaiveDateTime,
    pub expires: NaiveDateTime,
}

/// Form record for `POST /snippet/create`
#[derive(Debug, Default, Clone)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i64,
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// Blank form shown on first render, defaulting to a one year lifetime
    pub fn blank() -> Self {
        Self {
            expires: 365,
            ..Self::default()
        }
    }
}

impl FormBinding for SnippetCreateForm {
    fn fields() -> Vec<FormField<Self>> {
        vec![
            FormField::text("title", |f, v| f.title = v),
            FormField::text("content", |f, v| f.content = v),
            FormField::int("expires", |f, v| f.expires = v),
        ]
    }
}
