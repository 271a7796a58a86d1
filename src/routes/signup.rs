//! Signup route handlers

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::queries::user::{create_user, get_user_by_username};
use crate::routes::{render_template, AppState};

#[derive(askama::Template, Default)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub username: String,
    pub username_error: Option<String>,
    pub password_error: Option<String>,
    pub confirm_password_error: Option<String>,
}

/// GET /signup - Show signup form
pub async fn page() -> Result<Response, AppError> {
    Ok(render_template(SignupTemplate::default())?.into_response())
}

#[derive(Deserialize, Validate)]
pub struct ActionInput {
    #[validate(length(min = 1, message = "Username is required!"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required!"))]
    pub password: String,
    pub confirm_password: String,
}

fn field_message(errors: &validator::ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|errs| errs.first())
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
}

/// POST /signup - Handle signup submission
///
/// Nothing is written unless every check passes; failures come back as
/// field-attached messages on the re-rendered form.
pub async fn action(
    State(state): State<AppState>,
    Form(input): Form<ActionInput>,
) -> Result<Response, AppError> {
    if let Err(errors) = input.validate() {
        return Ok(render_template(SignupTemplate {
            username: input.username,
            username_error: field_message(&errors, "username"),
            password_error: field_message(&errors, "password"),
            confirm_password_error: None,
        })?
        .into_response());
    }

    if input.password != input.confirm_password {
        return Ok(render_template(SignupTemplate {
            username: input.username,
            confirm_password_error: Some("Passwords do not match!".to_string()),
            ..Default::default()
        })?
        .into_response());
    }

    if get_user_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Ok(render_template(SignupTemplate {
            username: input.username,
            username_error: Some("Username already taken!".to_string()),
            ..Default::default()
        })?
        .into_response());
    }

    let password_hash = hash_password(&input.password)?;
    let user_id = create_user(&state.pool, &input.username, &password_hash).await?;

    info!(user_id, username = %input.username, "User signed up");

    // No session is created on signup; the user logs in explicitly
    Ok(Redirect::to("/login").into_response())
}
