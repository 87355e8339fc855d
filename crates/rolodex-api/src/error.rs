//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure renders as `{"errors": …}`: a field map for validation
//! failures, a message string otherwise.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolodex_core::Error;
use serde_json::{Value, json};
use thiserror::Error;

/// An error returned by an API handler or extractor.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Core(#[from] Error),

  /// Malformed body, path or query string.
  #[error("bad request: {0}")]
  BadRequest(String),
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, errors): (StatusCode, Value) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.into()),
      ApiError::Core(e) => match e {
        Error::Validation(errs) => (StatusCode::BAD_REQUEST, json!(errs)),
        Error::Conflict(m) => (StatusCode::BAD_REQUEST, m.into()),
        Error::NotFound(m) => (StatusCode::NOT_FOUND, m.into()),
        Error::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.into()),
        e @ (Error::Credential(_) | Error::Store(_)) => {
          tracing::error!(error = %e, "request failed");
          (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
        }
      },
    };
    (status, Json(json!({ "errors": errors }))).into_response()
  }
}
