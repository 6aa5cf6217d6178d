//! Error types for the equipment inventory server

use axum::http::StatusCode;
use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    InvalidNumber(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    InvalidEnum(String),

    #[error("could not connect to database: {0}")]
    StorageUnavailable(String),

    #[error("something went wrong with query: {0}")]
    StorageQueryFailed(String),

    #[error("endpoint not found")]
    EndpointNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timed out")]
    RequestTimeout,
}

impl AppError {
    /// HTTP status the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::InvalidNumber(_)
            | AppError::InvalidFormat(_)
            | AppError::NotFound(_)
            | AppError::Duplicate(_)
            | AppError::InvalidEnum(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) | AppError::StorageQueryFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Short taxonomy name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MissingField",
            AppError::InvalidNumber(_) => "InvalidNumber",
            AppError::InvalidFormat(_) => "InvalidFormat",
            AppError::NotFound(_) => "NotFound",
            AppError::Duplicate(_) => "Duplicate",
            AppError::InvalidEnum(_) => "InvalidEnum",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::StorageQueryFailed(_) => "StorageQueryFailed",
            AppError::EndpointNotFound => "EndpointNotFound",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::RequestTimeout => "RequestTimeout",
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::StorageQueryFailed(_)
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => AppError::StorageUnavailable(err.to_string()),
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::Duplicate(format!("record already exists: {}", db.message()))
            }
            _ => AppError::StorageQueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
