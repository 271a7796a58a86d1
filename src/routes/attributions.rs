use axum::response::{IntoResponse, Response};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::routes::render_template;

#[derive(askama::Template)]
#[template(path = "attributions.html")]
pub struct AttributionsTemplate;

pub async fn page(AuthUser(_user): AuthUser) -> Result<Response, AppError> {
    Ok(render_template(AttributionsTemplate)?.into_response())
}
