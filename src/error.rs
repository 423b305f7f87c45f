use crate::db::error::DbError;
use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

/// The error taxonomy every storage operation resolves to. The HTTP layer
/// maps each variant to a status code; storage never panics on a backend
/// failure, it classifies it into one of these.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No row matched a point lookup, update or delete by identifier
    #[error("{0}")]
    NotFound(String),

    /// A write referenced a missing owner/location/destination/parent, or
    /// collided with an existing name
    #[error("{0}")]
    BadRequest(String),

    /// A caller-supplied field failed validation before any backend call
    #[error("invalid argument: {field}: {message}")]
    InvalidArgument { field: &'static str, message: String },

    /// Query execution failure, row decode failure, or any backend error
    /// not otherwise classified
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        DomainError::Internal(e.to_string())
    }
}
