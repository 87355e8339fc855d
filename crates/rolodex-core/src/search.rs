//! Contact search: the query schema, the predicate clauses it expands to, and
//! the paging summary.
//!
//! The clauses are an ordered list ANDed together (and with the owner filter
//! applied by the store). Backends translate each clause into their own query
//! language; [`ContactFilter::matches`] is the reference semantics.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::contact::{Contact, ContactResponse};

fn default_page() -> i64 { 1 }

fn default_size() -> i64 { 10 }

// ─── Query ───────────────────────────────────────────────────────────────────

/// Query string of `GET /contacts`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchContactRequest {
  /// Substring of either the first or the last name.
  #[validate(length(max = 100))]
  pub name:  Option<String>,
  #[validate(length(max = 100))]
  pub email: Option<String>,
  #[validate(length(max = 100))]
  pub phone: Option<String>,
  /// 1-based page number.
  #[serde(default = "default_page")]
  #[validate(range(min = 1))]
  pub page:  i64,
  #[serde(default = "default_size")]
  #[validate(range(min = 1, max = 100))]
  pub size:  i64,
}

impl Default for SearchContactRequest {
  fn default() -> Self {
    Self {
      name:  None,
      email: None,
      phone: None,
      page:  default_page(),
      size:  default_size(),
    }
  }
}

impl SearchContactRequest {
  /// Expand the query into its clause list. Empty strings add no clause.
  pub fn filters(&self) -> Vec<ContactFilter> {
    let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());

    let mut filters = Vec::new();
    if let Some(name) = non_empty(&self.name) {
      filters.push(ContactFilter::NameContains(name));
    }
    if let Some(email) = non_empty(&self.email) {
      filters.push(ContactFilter::EmailContains(email));
    }
    if let Some(phone) = non_empty(&self.phone) {
      filters.push(ContactFilter::PhoneContains(phone));
    }
    filters
  }

  /// Rows to skip: `(page - 1) * size`.
  pub fn offset(&self) -> i64 { (self.page - 1).saturating_mul(self.size) }
}

// ─── Clauses ─────────────────────────────────────────────────────────────────

/// A single case-sensitive substring predicate over a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
  /// `first_name` or `last_name` contains the needle.
  NameContains(String),
  EmailContains(String),
  PhoneContains(String),
}

impl ContactFilter {
  /// In-memory evaluation of the clause. Store backends translate clauses to
  /// their own query language; this is the reference their results are
  /// checked against in tests.
  pub fn matches(&self, contact: &Contact) -> bool {
    let contains = |field: &Option<String>, needle: &str| {
      field.as_deref().is_some_and(|f| f.contains(needle))
    };

    match self {
      Self::NameContains(n) => {
        contact.first_name.contains(n.as_str()) || contains(&contact.last_name, n)
      }
      Self::EmailContains(e) => contains(&contact.email, e),
      Self::PhoneContains(p) => contains(&contact.phone, p),
    }
  }
}

// ─── Result ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paging {
  pub current_page: i64,
  pub size:         i64,
  pub total_page:   i64,
}

impl Paging {
  /// `total` is the number of matching rows across all pages.
  pub fn new(current_page: i64, size: i64, total: i64) -> Self {
    Self {
      current_page,
      size,
      total_page: (total + size - 1) / size,
    }
  }
}

/// A page of contacts plus the paging summary; serialises as the
/// `{data, paging}` response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
  pub data:   Vec<ContactResponse>,
  pub paging: Paging,
}
