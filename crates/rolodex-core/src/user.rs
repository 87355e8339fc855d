//! User accounts, the owners of every contact.
//!
//! The username is the ownership key carried by each contact row; there is no
//! synthetic user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub username:      String,
  /// argon2 PHC string, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub name:          String,
  /// SHA-256 hex digest of the current session token, if logged in.
  pub token_digest:  Option<String>,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::ContactStore::insert_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
  pub name:          String,
}

/// Partial update applied by [`crate::store::ContactStore::update_user`].
/// `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
  pub name:          Option<String>,
  pub password_hash: Option<String>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUserRequest {
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub username: String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub password: String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub name:     String,
}

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginUserRequest {
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub username: String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub password: String,
}

/// Body of `PATCH /users/current`; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
  #[validate(length(min = 1, max = 100))]
  pub name:     Option<String>,
  #[validate(length(min = 1, max = 100))]
  pub password: Option<String>,
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Public view of a user. The token is only present on the login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
  pub username: String,
  pub name:     String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub token:    Option<String>,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    Self {
      username: user.username,
      name:     user.name,
      token:    None,
    }
  }
}
