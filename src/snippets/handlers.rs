//! Snippet handlers

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

use super::models::SnippetCreateForm;
use super::validators;
use crate::common::{AppError, AppState, BoundForm};
use crate::sessions::{Session, FLASH_KEY};
use crate::templates::{self, render, TemplateData};
use crate::users::AuthStatus;

/// GET /
pub async fn home(
    Extension(state): Extension<Arc<AppState>>,
    session: Session,
    auth: AuthStatus,
) -> Result<Response, AppError> {
    let snippets = state.snippets.latest().await?;

    let data = TemplateData::new(&session, auth);
    Ok(render(StatusCode::OK, templates::home_page(&data, &snippets)))
}

/// GET /snippet/view/:id
///
/// Non-numeric and non-positive ids are treated as missing.
pub async fn snippet_view(
    Extension(state): Extension<Arc<AppState>>,
    session: Session,
    auth: AuthStatus,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = match id.parse::<i64>() {
        Ok(id) if id >= 1 => id,
        _ => {
            debug!(raw_id = %id, "Rejecting invalid snippet id");
            return Err(AppError::NotFound);
        }
    };

    let snippet = state.snippets.get(id).await?;

    let data = TemplateData::new(&session, auth);
    Ok(render(StatusCode::OK, templates::view_page(&data, &snippet)))
}

/// GET /snippet/create
pub async fn snippet_create(session: Session, auth: AuthStatus) -> Response {
    let data = TemplateData::new(&session, auth);
    render(
        StatusCode::OK,
        templates::create_page(&data, &SnippetCreateForm::blank()),
    )
}

/// POST /snippet/create
///
/// Re-renders the form with 422 on validation failure, otherwise stores the
/// snippet and redirects to it.
pub async fn snippet_create_post(
    Extension(state): Extension<Arc<AppState>>,
    session: Session,
    auth: AuthStatus,
    BoundForm(mut form): BoundForm<SnippetCreateForm>,
) -> Result<Response, AppError> {
    validators::validate_create(&mut form);

    if !form.validator.valid() {
        debug!(errors = ?form.validator.field_errors, "Snippet form failed validation");
        let data = TemplateData::new(&session, auth);
        return Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            templates::create_page(&data, &form),
        ));
    }

    let id = state
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;
    info!(snippet_id = id, user_id = ?auth.user_id, "Created snippet");

    session.put(FLASH_KEY, "Snippet successfully created!");

    Ok(Redirect::to(&format!("/snippet/view/{}", id)).into_response())
}
