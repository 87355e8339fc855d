//! Address records. Every address hangs off exactly one contact.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted address row. `contact_id` is never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
  pub id:          i64,
  pub contact_id:  i64,
  pub street:      String,
  pub city:        String,
  pub province:    String,
  pub country:     String,
  pub postal_code: String,
}

/// The mutable columns of an address. Updates replace all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
  pub street:      String,
  pub city:        String,
  pub province:    String,
  pub country:     String,
  pub postal_code: String,
}

/// Body of `POST /contacts/{cid}/addresses` and
/// `PUT /contacts/{cid}/addresses/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddressRequest {
  #[serde(default)]
  #[validate(length(min = 1, max = 255))]
  pub street:      String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub city:        String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub province:    String,
  #[serde(default)]
  #[validate(length(min = 1, max = 100))]
  pub country:     String,
  #[serde(default)]
  #[validate(length(min = 1, max = 10))]
  pub postal_code: String,
}

impl From<AddressRequest> for AddressFields {
  fn from(r: AddressRequest) -> Self {
    Self {
      street:      r.street,
      city:        r.city,
      province:    r.province,
      country:     r.country,
      postal_code: r.postal_code,
    }
  }
}

/// Public projection of an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressResponse {
  pub id:          i64,
  pub street:      String,
  pub city:        String,
  pub province:    String,
  pub country:     String,
  pub postal_code: String,
}

impl From<Address> for AddressResponse {
  fn from(a: Address) -> Self {
    Self {
      id:          a.id,
      street:      a.street,
      city:        a.city,
      province:    a.province,
      country:     a.country,
      postal_code: a.postal_code,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_empty_fields_report_each_field() {
    let errs = AddressRequest::default().validate().unwrap_err();
    let fields = errs.field_errors();
    for name in ["street", "city", "province", "country", "postal_code"] {
      assert!(fields.contains_key(name), "missing error for {name}");
    }
  }

  #[test]
  fn postal_code_longer_than_ten_is_rejected() {
    let r = AddressRequest {
      street:      "test".into(),
      city:        "test".into(),
      province:    "test".into(),
      country:     "test".into(),
      postal_code: "12345678901".into(),
    };
    let errs = r.validate().unwrap_err();
    assert_eq!(errs.field_errors().len(), 1);
  }
}
