pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

use crate::error::{AppError, AppResult};

/// Parses a numeric path segment, answering `Invalid <label> ID` otherwise.
pub fn parse_id(raw: &str, label: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {label} ID")))
}
