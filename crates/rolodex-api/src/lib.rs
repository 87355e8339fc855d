//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`]. TLS, tracing
//! layers and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolodex_api::api_router(store.clone()))
//! ```

pub mod addresses;
pub mod contacts;
pub mod error;
pub mod extract;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  response::{IntoResponse, Response},
  routing::{get, post},
};
use rolodex_core::{
  service::{AddressService, ContactService, UserService},
  store::ContactStore,
};
use serde::Serialize;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub users:     UserService<S>,
  pub contacts:  ContactService<S>,
  pub addresses: AddressService<S>,
}

impl<S: ContactStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    let contacts = ContactService::new(Arc::clone(&store));
    Self {
      users:     UserService::new(Arc::clone(&store)),
      addresses: AddressService::new(store, contacts.clone()),
      contacts,
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      users:     self.users.clone(),
      contacts:  self.contacts.clone(),
      addresses: self.addresses.clone(),
    }
  }
}

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Success envelope: renders as `{"data": …}`.
#[derive(Debug)]
pub struct Data<T>(pub T);

#[derive(Serialize)]
struct Envelope<T> {
  data: T,
}

impl<T: Serialize> IntoResponse for Data<T> {
  fn into_response(self) -> Response {
    axum::Json(Envelope { data: self.0 }).into_response()
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::register::<S>))
    .route("/users/login", post(users::login::<S>))
    .route(
      "/users/current",
      get(users::current::<S>)
        .patch(users::update::<S>)
        .delete(users::logout::<S>),
    )
    // Contacts
    .route("/contacts", get(contacts::search::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::remove::<S>),
    )
    // Addresses
    .route(
      "/contacts/{contact_id}/addresses",
      get(addresses::list::<S>).post(addresses::create::<S>),
    )
    .route(
      "/contacts/{contact_id}/addresses/{address_id}",
      get(addresses::get_one::<S>)
        .put(addresses::update::<S>)
        .delete(addresses::remove::<S>),
    )
    .with_state(AppState::new(store))
}
