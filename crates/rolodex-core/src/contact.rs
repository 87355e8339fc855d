//! Contact records, the create/update schema, and the public projection.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted contact row. `username` is the owner; it is never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id:         i64,
  pub username:   String,
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

/// The mutable columns of a contact. On update, `None` optionals are left as
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

/// Body of `POST /contacts` and `PUT /contacts/{id}`.
///
/// On update the target id comes from the path, and omitted optional fields
/// keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactRequest {
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub first_name: String,
  #[validate(length(min = 1, max = 100))]
  pub last_name:  Option<String>,
  #[validate(length(min = 1, max = 100), email)]
  pub email:      Option<String>,
  #[validate(length(min = 1, max = 20))]
  pub phone:      Option<String>,
}

impl From<ContactRequest> for ContactFields {
  fn from(r: ContactRequest) -> Self {
    Self {
      first_name: r.first_name,
      last_name:  r.last_name,
      email:      r.email,
      phone:      r.phone,
    }
  }
}

/// Public projection of a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponse {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

impl From<Contact> for ContactResponse {
  fn from(c: Contact) -> Self {
    Self {
      id:         c.id,
      first_name: c.first_name,
      last_name:  c.last_name,
      email:      c.email,
      phone:      c.phone,
    }
  }
}
