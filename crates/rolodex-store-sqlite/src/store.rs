//! [`SqliteStore`]: the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rolodex_core::{
  address::{Address, AddressFields},
  contact::{Contact, ContactFields},
  search::ContactFilter,
  store::ContactStore,
  user::{NewUser, User, UserChanges},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{
    ADDRESS_COLUMNS, CONTACT_COLUMNS, RawUser, USER_COLUMNS, address_from_row,
    contact_from_row, encode_dt,
  },
  filter::where_clause,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row user query and decode the result.
  async fn query_user(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(&sql, rusqlite::params_from_iter(params), RawUser::from_row)
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn insert_user(&self, input: NewUser) -> Result<Option<User>> {
    let user = User {
      username:      input.username,
      password_hash: input.password_hash,
      name:          input.name,
      token_digest:  None,
      created_at:    Utc::now(),
    };

    let username = user.username.clone();
    let password = user.password_hash.clone();
    let name     = user.name.clone();
    let at_str   = encode_dt(user.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO users (username, password, name, created_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (username) DO NOTHING",
          rusqlite::params![username, password, name, at_str],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(inserted.then_some(user))
  }

  async fn get_user(&self, username: &str) -> Result<Option<User>> {
    self
      .query_user(
        format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        vec![username.to_owned().into()],
      )
      .await
  }

  async fn get_user_by_token(&self, token_digest: &str) -> Result<Option<User>> {
    self
      .query_user(
        format!("SELECT {USER_COLUMNS} FROM users WHERE token_digest = ?1"),
        vec![token_digest.to_owned().into()],
      )
      .await
  }

  async fn update_user(
    &self,
    username: &str,
    changes:  UserChanges,
  ) -> Result<Option<User>> {
    // COALESCE keeps the stored value where the change is NULL.
    self
      .query_user(
        format!(
          "UPDATE users
           SET name = COALESCE(?2, name), password = COALESCE(?3, password)
           WHERE username = ?1
           RETURNING {USER_COLUMNS}"
        ),
        vec![
          username.to_owned().into(),
          changes.name.into(),
          changes.password_hash.into(),
        ],
      )
      .await
  }

  async fn set_user_token(
    &self,
    username:     &str,
    token_digest: Option<String>,
  ) -> Result<()> {
    let username = username.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET token_digest = ?2 WHERE username = ?1",
          rusqlite::params![username, token_digest],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn insert_contact(&self, owner: &str, fields: ContactFields) -> Result<Contact> {
    let username = owner.to_owned();

    let id = self
      .conn
      .call({
        let username = username.clone();
        let fields   = fields.clone();
        move |conn| {
          conn.execute(
            "INSERT INTO contacts (username, first_name, last_name, email, phone)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
              username,
              fields.first_name,
              fields.last_name,
              fields.email,
              fields.phone,
            ],
          )?;
          Ok(conn.last_insert_rowid())
        }
      })
      .await?;

    Ok(Contact {
      id,
      username,
      first_name: fields.first_name,
      last_name:  fields.last_name,
      email:      fields.email,
      phone:      fields.phone,
    })
  }

  async fn find_contact(&self, owner: &str, id: i64) -> Result<Option<Contact>> {
    let username = owner.to_owned();

    let contact = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1 AND username = ?2"
            ),
            rusqlite::params![id, username],
            contact_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(contact)
  }

  async fn update_contact(
    &self,
    owner:  &str,
    id:     i64,
    fields: ContactFields,
  ) -> Result<Option<Contact>> {
    let username = owner.to_owned();

    let contact = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE contacts
               SET first_name = ?3,
                   last_name  = COALESCE(?4, last_name),
                   email      = COALESCE(?5, email),
                   phone      = COALESCE(?6, phone)
               WHERE id = ?1 AND username = ?2
               RETURNING {CONTACT_COLUMNS}"
            ),
            rusqlite::params![
              id,
              username,
              fields.first_name,
              fields.last_name,
              fields.email,
              fields.phone,
            ],
            contact_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(contact)
  }

  async fn delete_contact(&self, owner: &str, id: i64) -> Result<Option<Contact>> {
    let username = owner.to_owned();

    let contact = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "DELETE FROM contacts WHERE id = ?1 AND username = ?2
               RETURNING {CONTACT_COLUMNS}"
            ),
            rusqlite::params![id, username],
            contact_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(contact)
  }

  async fn search_contacts(
    &self,
    owner:   &str,
    filters: &[ContactFilter],
    limit:   i64,
    offset:  i64,
  ) -> Result<Vec<Contact>> {
    let (where_sql, mut params) = where_clause(owner, filters);
    params.push(limit.into());
    params.push(offset.into());

    let contacts = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts {where_sql}
           ORDER BY id
           LIMIT ? OFFSET ?"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(contacts)
  }

  async fn count_contacts(&self, owner: &str, filters: &[ContactFilter]) -> Result<i64> {
    let (where_sql, params) = where_clause(owner, filters);

    let total: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM contacts {where_sql}");
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(params), |r| r.get(0))?)
      })
      .await?;
    Ok(total)
  }

  // ── Addresses ─────────────────────────────────────────────────────────────

  async fn insert_address(&self, contact_id: i64, fields: AddressFields) -> Result<Address> {
    let id = self
      .conn
      .call({
        let fields = fields.clone();
        move |conn| {
          conn.execute(
            "INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
              contact_id,
              fields.street,
              fields.city,
              fields.province,
              fields.country,
              fields.postal_code,
            ],
          )?;
          Ok(conn.last_insert_rowid())
        }
      })
      .await?;

    Ok(Address {
      id,
      contact_id,
      street:      fields.street,
      city:        fields.city,
      province:    fields.province,
      country:     fields.country,
      postal_code: fields.postal_code,
    })
  }

  async fn find_address(&self, contact_id: i64, id: i64) -> Result<Option<Address>> {
    let address = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1 AND contact_id = ?2"
            ),
            rusqlite::params![id, contact_id],
            address_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(address)
  }

  async fn update_address(
    &self,
    contact_id: i64,
    id:         i64,
    fields:     AddressFields,
  ) -> Result<Option<Address>> {
    let address = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE addresses
               SET street = ?3, city = ?4, province = ?5, country = ?6, postal_code = ?7
               WHERE id = ?1 AND contact_id = ?2
               RETURNING {ADDRESS_COLUMNS}"
            ),
            rusqlite::params![
              id,
              contact_id,
              fields.street,
              fields.city,
              fields.province,
              fields.country,
              fields.postal_code,
            ],
            address_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(address)
  }

  async fn delete_address(&self, contact_id: i64, id: i64) -> Result<Option<Address>> {
    let address = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "DELETE FROM addresses WHERE id = ?1 AND contact_id = ?2
               RETURNING {ADDRESS_COLUMNS}"
            ),
            rusqlite::params![id, contact_id],
            address_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(address)
  }

  async fn list_addresses(&self, contact_id: i64) -> Result<Vec<Address>> {
    let addresses = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE contact_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![contact_id], address_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(addresses)
  }
}
