//! Signup, login and logout handlers

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::extractors::AuthStatus;
use super::models::{UserLoginForm, UserSignupForm};
use super::validators::{
    validate_login, validate_signup, DUPLICATE_EMAIL_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
};
use crate::common::{safe_email_log, AppError, AppState, BoundForm, ModelError};
use crate::sessions::{Session, AUTH_USER_KEY, FLASH_KEY};
use crate::templates::{self, render, TemplateData};

fn signup_failed(session: &Session, auth: AuthStatus, form: &UserSignupForm) -> Response {
    let data = TemplateData::new(session, auth);
    render(
        StatusCode::UNPROCESSABLE_ENTITY,
        templates::signup_page(&data, form),
    )
}

fn login_failed(session: &Session, auth: AuthStatus, form: &UserLoginForm) -> Response {
    let data = TemplateData::new(session, auth);
    render(
        StatusCode::UNPROCESSABLE_ENTITY,
        templates::login_page(&data, form),
    )
}

/// GET /user/signup
pub async fn user_signup(session: Session, auth: AuthStatus) -> Response {
    let data = TemplateData::new(&session, auth);
    render(
        StatusCode::OK,
        templates::signup_page(&data, &UserSignupForm::default()),
    )
}

/// POST /user/signup
pub async fn user_signup_post(
    Extension(state): Extension<Arc<AppState>>,
    session: Session,
    auth: AuthStatus,
    BoundForm(mut form): BoundForm<UserSignupForm>,
) -> Result<Response, AppError> {
    validate_signup(&mut form);
    if !form.validator.valid() {
        debug!(errors = ?form.validator.field_errors, "Signup form failed validation");
        return Ok(signup_failed(&session, auth, &form));
    }

    match state
        .users
        .insert(&form.name, &form.email, &form.password)
        .await
    {
        Ok(()) => {}
        Err(ModelError::DuplicateEmail) => {
            info!(email = %safe_email_log(&form.email), "Signup with an email already in use");
            form.validator
                .add_field_error("email", DUPLICATE_EMAIL_MESSAGE);
            return Ok(signup_failed(&session, auth, &form));
        }
        Err(e) => return Err(e.into()),
    }

    info!(email = %safe_email_log(&form.email), "User signed up");
    session.put(FLASH_KEY, "Your signup was successful. Please log in.");

    Ok(Redirect::to("/user/login").into_response())
}

/// GET /user/login
pub async fn user_login(session: Session, auth: AuthStatus) -> Response {
    let data = TemplateData::new(&session, auth);
    render(
        StatusCode::OK,
        templates::login_page(&data, &UserLoginForm::default()),
    )
}

/// POST /user/login
///
/// The session token is renewed on success to prevent session fixation.
pub async fn user_login_post(
    Extension(state): Extension<Arc<AppState>>,
    session: Session,
    auth: AuthStatus,
    BoundForm(mut form): BoundForm<UserLoginForm>,
) -> Result<Response, AppError> {
    validate_login(&mut form);
    if !form.validator.valid() {
        debug!(errors = ?form.validator.field_errors, "Login form failed validation");
        return Ok(login_failed(&session, auth, &form));
    }

    let user_id = match state.users.authenticate(&form.email, &form.password).await {
        Ok(id) => id,
        Err(ModelError::InvalidCredentials) => {
            warn!(email = %safe_email_log(&form.email), "Failed login attempt");
            form.validator
                .add_non_field_error(INVALID_CREDENTIALS_MESSAGE);
            return Ok(login_failed(&session, auth, &form));
        }
        Err(e) => return Err(e.into()),
    };

    session.renew_token().await?;
    session.put(AUTH_USER_KEY, user_id);
    info!(user_id, "User logged in");

    Ok(Redirect::to("/snippet/create").into_response())
}

/// POST /user/logout
pub async fn user_logout_post(session: Session, auth: AuthStatus) -> Result<Response, AppError> {
    session.renew_token().await?;
    session.remove(AUTH_USER_KEY);
    session.put(FLASH_KEY, "You've been logged out successfully!");
    info!(user_id = ?auth.user_id, "User logged out");

    Ok(Redirect::to("/").into_response())
}
