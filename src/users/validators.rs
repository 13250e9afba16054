use super::models::{UserLoginForm, UserSignupForm};
use crate::common::validation::{matches, min_chars, not_blank, EMAIL_RX};

const BLANK_MESSAGE: &str = "This field cannot be blank";
const EMAIL_MESSAGE: &str = "This field must be a valid email address";

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email address is already in use";

/// Deliberately does not say which credential was wrong
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is incorrect";

pub fn validate_signup(form: &mut UserSignupForm) {
    let v = &mut form.validator;

    v.check_field(not_blank(&form.name), "name", BLANK_MESSAGE);
    v.check_field(not_blank(&form.email), "email", BLANK_MESSAGE);
    v.check_field(matches(&form.email, &EMAIL_RX), "email", EMAIL_MESSAGE);
    v.check_field(not_blank(&form.password), "password", BLANK_MESSAGE);
    v.check_field(
        min_chars(&form.password, 8),
        "password",
        "This field must be at least 8 characters long",
    );
}

pub fn validate_login(form: &mut UserLoginForm) {
    let v = &mut form.validator;

    v.check_field(not_blank(&form.email), "email", BLANK_MESSAGE);
    v.check_field(matches(&form.email, &EMAIL_RX), "email", EMAIL_MESSAGE);
    v.check_field(not_blank(&form.password), "password", BLANK_MESSAGE);
}
