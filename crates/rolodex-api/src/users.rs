//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/users` | Register; 201, 400 if the username is taken |
//! | `POST`   | `/users/login` | Returns the session token |
//! | `GET`    | `/users/current` | Auth required |
//! | `PATCH`  | `/users/current` | Body: `{"name"?, "password"?}` |
//! | `DELETE` | `/users/current` | Ends the session; returns `true` |

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{
  store::ContactStore,
  user::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse},
};

use crate::{
  AppState, Data,
  error::ApiError,
  extract::{CurrentUser, Json},
};

/// `POST /users`
pub async fn register<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let user = state.users.register(body).await?;
  Ok((StatusCode::CREATED, Data(user)))
}

/// `POST /users/login`
pub async fn login<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginUserRequest>,
) -> Result<Data<UserResponse>, ApiError> {
  Ok(Data(state.users.login(body).await?))
}

/// `GET /users/current`
pub async fn current<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Data<UserResponse> {
  Data(state.users.current(user))
}

/// `PATCH /users/current`
pub async fn update<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<UpdateUserRequest>,
) -> Result<Data<UserResponse>, ApiError> {
  Ok(Data(state.users.update(&user, body).await?))
}

/// `DELETE /users/current`
pub async fn logout<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Data<bool>, ApiError> {
  state.users.logout(&user).await?;
  Ok(Data(true))
}
