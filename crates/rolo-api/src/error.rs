//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<rolo_core::Error> for ApiError {
  fn from(err: rolo_core::Error) -> Self {
    match err {
      rolo_core::Error::NotFound(id) => {
        Self::NotFound(format!("contact {id} not found"))
      }
      rolo_core::Error::DuplicateEmail(_) => {
        Self::Conflict("a contact with this email already exists".to_string())
      }
      rolo_core::Error::Storage(detail) => Self::Internal(detail),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Internal(detail) => {
        // The storage detail goes to the log, not the client.
        tracing::error!(%detail, "storage failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
