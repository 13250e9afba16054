use super::models::{SnippetCreateForm, EXPIRY_OPTIONS};
use crate::common::validation::{max_chars, not_blank, permitted_value};

pub const BLANK_MESSAGE: &str = "This field cannot be blank";

/// Validates a submitted snippet, recording errors on the form's validator
pub fn validate_create(form: &mut SnippetCreateForm) {
    let v = &mut form.validator;

    v.check_field(not_blank(&form.title), "title", BLANK_MESSAGE);
    v.check_field(
        max_chars(&form.title, 100),
        "title",
        "This field cannot be more than 100 characters long",
    );
    v.check_field(not_blank(&form.content), "content", BLANK_MESSAGE);
    v.check_field(
        permitted_value(form.expires, &EXPIRY_OPTIONS),
        "expires",
        "This field must equal 1, 7 or 365",
    );
}
