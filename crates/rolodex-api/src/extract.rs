//! Extractors whose rejections render through [`ApiError`], plus the
//! caller-identity extractor.

use axum::{
  extract::{FromRequest, FromRequestParts},
  http::{HeaderMap, header, request::Parts},
};
use rolodex_core::{Error, store::ContactStore, user::User};

use crate::{AppState, error::ApiError};

/// `axum::Json` with a `{"errors": …}` rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

/// `axum::extract::Path` with a `{"errors": …}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query` with a `{"errors": …}` rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// The authenticated caller. Present in a handler means the request carried a
/// live session token.
pub struct CurrentUser(pub User);

/// Accepts both `Authorization: <token>` and `Authorization: Bearer <token>`.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
  let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
  (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: ContactStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = session_token(&parts.headers)
      .ok_or(Error::Unauthorized("Unauthorized"))?;
    let user = state.users.authenticate(token).await?;
    Ok(CurrentUser(user))
  }
}
