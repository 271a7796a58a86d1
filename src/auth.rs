//! Password hashing and request-level identity resolution
//!
//! [`AuthUser`] is the gate in front of protected pages: it resolves the
//! current user from the session cookie and rejects with a redirect to the
//! login page, preserving the originally requested URL as `next`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Uri},
    response::Redirect,
};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

use crate::queries::user::{get_user, UserRow};
use crate::routes::AppState;
use crate::session::get_session_user_id;

pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Hash a password with a freshly generated salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored hash
pub fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn login_redirect(uri: &Uri) -> Redirect {
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Redirect::to(&format!("/login?next={}", urlencoding::encode(next)))
}

/// Resolve the current user from the session cookie, if any
async fn resolve_user(jar: &CookieJar, state: &AppState) -> Option<UserRow> {
    let token = jar.get(SESSION_COOKIE_NAME)?.value().to_owned();

    let user_id = match get_session_user_id(&state.pool, &token).await {
        Ok(user_id) => user_id?,
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve session");
            return None;
        }
    };

    match get_user(&state.pool, user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, user_id, "Failed to load session user");
            None
        }
    }
}

/// Authenticated identity, required
///
/// Rejects with a redirect to `/login?next=<requested url>` when the request
/// carries no valid session.
pub struct AuthUser(pub UserRow);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uri = parts.uri.clone();

        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| login_redirect(&uri))?;

        match resolve_user(&jar, state).await {
            Some(user) => Ok(AuthUser(user)),
            None => Err(login_redirect(&uri)),
        }
    }
}

/// Authenticated identity, optional
///
/// Never rejects; pages open to anonymous visitors use this to adjust what
/// they render.
pub struct AuthOptional(pub Option<UserRow>);

impl FromRequestParts<AppState> for AuthOptional {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        Ok(AuthOptional(resolve_user(&jar, state).await))
    }
}
