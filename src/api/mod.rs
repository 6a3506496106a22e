pub mod articles;
pub mod comments;
pub mod docs;
pub mod health;
pub mod topics;
pub mod users;

use axum::http::Uri;

use crate::error::AppError;

pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route matched");
    AppError::NotFound("Path does not exist".into())
}
