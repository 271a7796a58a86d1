use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use sqlx::SqlitePool;

use crate::error::AppError;

mod assets;
mod attributions;
mod game;
mod health;
mod index;
mod login;
mod signup;

pub use assets::AssetsService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Helper to render a page template
pub(crate) fn render_template<T: Template>(t: T) -> Result<Html<String>, AppError> {
    Ok(Html(t.render()?))
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

async fn fallback() -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::NOT_FOUND, render_template(NotFoundTemplate)?))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        // Public pages
        .route("/", get(index::page))
        .route("/signup", get(signup::page).post(signup::action))
        .route("/login", get(login::page).post(login::action))
        // Gated pages
        .route("/logout", get(login::logout))
        .route("/game", get(game::page))
        .route("/attributions", get(attributions::page))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(state)
}
