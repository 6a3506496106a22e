use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", invalid_parameters_message(.0))]
    InvalidQueryParameter(Vec<String>),
    #[error("Invalid topic format")]
    InvalidTopicFormat,
    #[error("Invalid sort query")]
    InvalidSortQuery,
    #[error("Invalid order query")]
    InvalidOrderQuery,
    #[error("Topic not found")]
    TopicNotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    msg: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidQueryParameter(_)
            | AppError::InvalidTopicFormat
            | AppError::InvalidSortQuery
            | AppError::InvalidOrderQuery
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TopicNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if let AppError::Internal(err) = &self {
            tracing::error!(error = ?err, "internal server error");
        }

        let body = Json(ErrorBody {
            msg: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.into())
    }
}

/// Renders `"<label>: a, b"` with the label pluralised when more than one
/// name is listed.
pub fn list_message(singular: &str, plural: &str, names: &[String]) -> String {
    let label = if names.len() > 1 { plural } else { singular };
    format!("{label}: {}", names.join(", "))
}

fn invalid_parameters_message(names: &[String]) -> String {
    list_message("Invalid query parameter", "Invalid query parameters", names)
}

pub type AppResult<T> = Result<T, AppError>;
