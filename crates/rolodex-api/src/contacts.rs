//! Handlers for `/contacts` endpoints. All require a session.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | `?name&email&phone&page&size`; returns `{data, paging}` |
//! | `POST`   | `/contacts` | Body: [`ContactRequest`]; returns 201 |
//! | `GET`    | `/contacts/{id}` | 404 if absent or not the caller's |
//! | `PUT`    | `/contacts/{id}` | Omitted optional fields are kept |
//! | `DELETE` | `/contacts/{id}` | Returns `true`; addresses go with it |

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{
  contact::{ContactRequest, ContactResponse},
  search::{SearchContactRequest, SearchResult},
  store::ContactStore,
};

use crate::{
  AppState, Data,
  error::ApiError,
  extract::{CurrentUser, Json, Path, Query},
};

/// `GET /contacts[?name=...][&email=...][&phone=...][&page=...][&size=...]`
pub async fn search<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<SearchContactRequest>,
) -> Result<axum::Json<SearchResult>, ApiError> {
  let result = state.contacts.search(&user.username, params).await?;
  Ok(axum::Json(result))
}

/// `POST /contacts`
pub async fn create<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(body): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let contact = state.contacts.create(&user.username, body).await?;
  Ok((StatusCode::CREATED, Data(contact)))
}

/// `GET /contacts/{id}`
pub async fn get_one<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Data<ContactResponse>, ApiError> {
  Ok(Data(state.contacts.get(&user.username, id).await?))
}

/// `PUT /contacts/{id}`
pub async fn update<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<ContactRequest>,
) -> Result<Data<ContactResponse>, ApiError> {
  Ok(Data(state.contacts.update(&user.username, id, body).await?))
}

/// `DELETE /contacts/{id}`
pub async fn remove<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Data<bool>, ApiError> {
  state.contacts.remove(&user.username, id).await?;
  Ok(Data(true))
}
