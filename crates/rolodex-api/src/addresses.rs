//! Handlers for `/contacts/{contact_id}/addresses` endpoints. All require a
//! session; a contact the caller does not own is a 404 before any address is
//! looked at.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts/{cid}/addresses` | Every address, unpaginated |
//! | `POST`   | `/contacts/{cid}/addresses` | Body: [`AddressRequest`]; returns 201 |
//! | `GET`    | `/contacts/{cid}/addresses/{id}` | |
//! | `PUT`    | `/contacts/{cid}/addresses/{id}` | Full replace |
//! | `DELETE` | `/contacts/{cid}/addresses/{id}` | Returns `true` |

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{
  address::{AddressRequest, AddressResponse},
  store::ContactStore,
};

use crate::{
  AppState, Data,
  error::ApiError,
  extract::{CurrentUser, Json, Path},
};

/// `GET /contacts/{cid}/addresses`
pub async fn list<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(contact_id): Path<i64>,
) -> Result<Data<Vec<AddressResponse>>, ApiError> {
  Ok(Data(state.addresses.list(&user.username, contact_id).await?))
}

/// `POST /contacts/{cid}/addresses`
pub async fn create<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(contact_id): Path<i64>,
  Json(body): Json<AddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
  let address = state
    .addresses
    .create(&user.username, contact_id, body)
    .await?;
  Ok((StatusCode::CREATED, Data(address)))
}

/// `GET /contacts/{cid}/addresses/{id}`
pub async fn get_one<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
) -> Result<Data<AddressResponse>, ApiError> {
  let address = state
    .addresses
    .get(&user.username, contact_id, address_id)
    .await?;
  Ok(Data(address))
}

/// `PUT /contacts/{cid}/addresses/{id}`
pub async fn update<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
  Json(body): Json<AddressRequest>,
) -> Result<Data<AddressResponse>, ApiError> {
  let address = state
    .addresses
    .update(&user.username, contact_id, address_id, body)
    .await?;
  Ok(Data(address))
}

/// `DELETE /contacts/{cid}/addresses/{id}`
pub async fn remove<S: ContactStore + 'static>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path((contact_id, address_id)): Path<(i64, i64)>,
) -> Result<Data<bool>, ApiError> {
  state
    .addresses
    .remove(&user.username, contact_id, address_id)
    .await?;
  Ok(Data(true))
}
