//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! The services in [`crate::service`] depend on this abstraction, not on any
//! concrete backend.
//!
//! Contact operations always take the owner alongside the id, and address
//! operations always take the parent contact id. A backend must apply both in
//! the same lookup so a row belonging to someone else is indistinguishable
//! from a missing one.

use std::future::Future;

use crate::{
  address::{Address, AddressFields},
  contact::{Contact, ContactFields},
  search::ContactFilter,
  user::{NewUser, User, UserChanges},
};

/// Abstraction over a Rolodex persistence backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. Returns `None` if the username is already taken.
  fn insert_user(
    &self,
    user: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Resolve the user whose stored session digest equals `token_digest`.
  fn get_user_by_token<'a>(
    &'a self,
    token_digest: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Apply `changes`; returns the updated row, or `None` if no such user.
  fn update_user<'a>(
    &'a self,
    username: &'a str,
    changes: UserChanges,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Replace (or clear) the session token digest.
  fn set_user_token<'a>(
    &'a self,
    username: &'a str,
    token_digest: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Contacts ──────────────────────────────────────────────────────────

  fn insert_contact<'a>(
    &'a self,
    owner: &'a str,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + 'a;

  /// Look up a contact by id *and* owner.
  fn find_contact<'a>(
    &'a self,
    owner: &'a str,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Set `first_name` and every optional field that is `Some`; `None`
  /// optionals keep their stored value. `None` if no row matched (id, owner).
  fn update_contact<'a>(
    &'a self,
    owner: &'a str,
    id: i64,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Delete and return the row; its addresses go with it.
  fn delete_contact<'a>(
    &'a self,
    owner: &'a str,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// One page of the owner's contacts matching every clause in `filters`.
  fn search_contacts<'a>(
    &'a self,
    owner: &'a str,
    filters: &'a [ContactFilter],
    limit: i64,
    offset: i64,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// Count of the owner's contacts matching every clause, ignoring paging.
  fn count_contacts<'a>(
    &'a self,
    owner: &'a str,
    filters: &'a [ContactFilter],
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  // ── Addresses ─────────────────────────────────────────────────────────

  fn insert_address(
    &self,
    contact_id: i64,
    fields: AddressFields,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + '_;

  /// Look up an address by id *and* parent contact.
  fn find_address(
    &self,
    contact_id: i64,
    id: i64,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  fn update_address(
    &self,
    contact_id: i64,
    id: i64,
    fields: AddressFields,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  fn delete_address(
    &self,
    contact_id: i64,
    id: i64,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  /// Every address of the contact, ordered by id.
  fn list_addresses(
    &self,
    contact_id: i64,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + '_;
}
