//! Login and logout route handlers

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, Form,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::{verify_password, AuthUser, SESSION_COOKIE_NAME};
use crate::error::AppError;
use crate::queries::user::get_user_by_username;
use crate::routes::{render_template, AppState};
use crate::session::{create_session, delete_session};

#[derive(askama::Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub next: Option<String>,
    pub username_error: Option<String>,
    pub password_error: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub next: Option<String>,
}

/// GET /login - Show login form
///
/// A `next` query parameter (set by the route gate) is carried through a
/// hidden form field so the user lands on their intended page afterwards.
pub async fn page(Query(query): Query<PageQuery>) -> Result<Response, AppError> {
    Ok(render_template(LoginTemplate {
        next: query.next,
        ..Default::default()
    })?
    .into_response())
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// POST /login - Handle login submission
pub async fn action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> Result<Response, AppError> {
    let Some(user) = get_user_by_username(&state.pool, &input.username).await? else {
        return Ok(render_template(LoginTemplate {
            username: input.username,
            next: input.next,
            username_error: Some("No such username!".to_string()),
            ..Default::default()
        })?
        .into_response());
    };

    if !verify_password(&user.password, &input.password)? {
        return Ok(render_template(LoginTemplate {
            username: input.username,
            next: input.next,
            password_error: Some("Incorrect password!".to_string()),
            ..Default::default()
        })?
        .into_response());
    }

    // Clear any prior session before establishing a new one
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        delete_session(&state.pool, cookie.value()).await?;
    }

    let token = create_session(&state.pool, user.user_id).await?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    let jar = jar.add(cookie);

    info!(user_id = user.user_id, username = %user.username, "User logged in");

    let destination = input
        .next
        .filter(|next| !next.is_empty())
        .unwrap_or_else(|| "/".to_string());

    Ok((jar, Redirect::to(&destination)).into_response())
}

/// GET /logout - Clear the session and redirect home (gated)
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        delete_session(&state.pool, cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::from(SESSION_COOKIE_NAME));

    info!(user_id = user.user_id, "User logged out");

    Ok((jar, Redirect::to("/")).into_response())
}
