//! Response envelope
//!
//! Every response, success or failure, is a JSON object
//! `{"Status": "ok" | "ERROR", "MSG": ..., "Action": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "ERROR";
pub const NO_ACTION: &str = "none";

/// Uniform response wrapper
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "MSG")]
    pub msg: T,
    #[serde(rename = "Action")]
    pub action: String,
}

/// Error envelope as it appears on the wire
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `ERROR`
    #[serde(rename = "Status")]
    #[schema(example = "ERROR")]
    pub status: String,
    /// Human readable error message
    #[serde(rename = "MSG")]
    pub msg: String,
    /// Endpoint to retry or consult, `none` when there is nothing to suggest
    #[serde(rename = "Action")]
    #[schema(example = "GET /api/v1/device")]
    pub action: String,
}

/// Success reply: 200 with the payload in `MSG`
pub type Reply<T> = ApiResult<Json<Envelope<T>>>;

/// Creation reply: 201 with the created record in `MSG`
pub type Created<T> = ApiResult<(StatusCode, Json<Envelope<T>>)>;

pub fn ok<T: Serialize>(msg: T) -> Json<Envelope<T>> {
    Json(Envelope {
        status: STATUS_OK,
        msg,
        action: NO_ACTION.to_string(),
    })
}

pub fn created<T: Serialize>(msg: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok(msg))
}

/// An [`AppError`] together with the hint reported in `Action`
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub action: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(error: AppError, action: impl Into<String>) -> Self {
        Self {
            error,
            action: action.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error, NO_ACTION)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if self.error.is_storage() {
            tracing::error!("{}: {}", self.error.kind(), self.error);
        } else {
            tracing::debug!("{}: {}", self.error.kind(), self.error);
        }

        let body = Json(Envelope {
            status: STATUS_ERROR,
            msg: self.error.to_string(),
            action: self.action,
        });
        (status, body).into_response()
    }
}

/// Attach an `Action` hint to a service result
pub trait WithAction<T> {
    fn action(self, hint: impl Into<String>) -> ApiResult<T>;
}

impl<T> WithAction<T> for AppResult<T> {
    fn action(self, hint: impl Into<String>) -> ApiResult<T> {
        self.map_err(|error| ApiError::new(error, hint))
    }
}
