use axum::response::{IntoResponse, Response};

use crate::auth::AuthOptional;
use crate::error::AppError;
use crate::queries::user::UserRow;
use crate::routes::render_template;

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: Option<UserRow>,
}

pub async fn page(AuthOptional(user): AuthOptional) -> Result<Response, AppError> {
    Ok(render_template(IndexTemplate { user })?.into_response())
}
