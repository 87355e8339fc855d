//! Encoding and decoding helpers between Rust domain types and the values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Contact and address rows map
//! one column to one field and are read straight off the row.

use chrono::{DateTime, Utc};
use rolodex_core::{address::Address, contact::Contact, user::User};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "username, password, name, token_digest, created_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub username:     String,
  pub password:     String,
  pub name:         String,
  pub token_digest: Option<String>,
  pub created_at:   String,
}

impl RawUser {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      username:     row.get(0)?,
      password:     row.get(1)?,
      name:         row.get(2)?,
      token_digest: row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      username:      self.username,
      password_hash: self.password,
      name:          self.name,
      token_digest:  self.token_digest,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

// ─── Contacts ────────────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str =
  "id, username, first_name, last_name, email, phone";

pub fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:         row.get(0)?,
    username:   row.get(1)?,
    first_name: row.get(2)?,
    last_name:  row.get(3)?,
    email:      row.get(4)?,
    phone:      row.get(5)?,
  })
}

// ─── Addresses ───────────────────────────────────────────────────────────────

pub const ADDRESS_COLUMNS: &str =
  "id, contact_id, street, city, province, country, postal_code";

pub fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
  Ok(Address {
    id:          row.get(0)?,
    contact_id:  row.get(1)?,
    street:      row.get(2)?,
    city:        row.get(3)?,
    province:    row.get(4)?,
    country:     row.get(5)?,
    postal_code: row.get(6)?,
  })
}
