use axum::response::{IntoResponse, Response};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::queries::user::UserRow;
use crate::routes::render_template;

#[derive(askama::Template)]
#[template(path = "game.html")]
pub struct GameTemplate {
    pub user: UserRow,
}

pub async fn page(AuthUser(user): AuthUser) -> Result<Response, AppError> {
    Ok(render_template(GameTemplate { user })?.into_response())
}
