//! Translation of [`ContactFilter`] clauses into a parameterised `WHERE`.
//!
//! Only the fixed SQL fragments below are ever formatted into a statement;
//! every user-supplied value travels as a bound parameter. `instr` is used
//! rather than `LIKE` because it is case-sensitive and has no wildcard
//! characters to escape.

use rolodex_core::search::ContactFilter;
use rusqlite::types::Value;

fn clause(filter: &ContactFilter) -> (&'static str, Vec<Value>) {
  match filter {
    ContactFilter::NameContains(name) => (
      "(instr(first_name, ?) > 0 OR instr(last_name, ?) > 0)",
      vec![Value::Text(name.clone()), Value::Text(name.clone())],
    ),
    ContactFilter::EmailContains(email) => {
      ("instr(email, ?) > 0", vec![Value::Text(email.clone())])
    }
    ContactFilter::PhoneContains(phone) => {
      ("instr(phone, ?) > 0", vec![Value::Text(phone.clone())])
    }
  }
}

/// Build `WHERE username = ? AND <clause> AND …` with its parameters, in
/// placeholder order.
pub fn where_clause(owner: &str, filters: &[ContactFilter]) -> (String, Vec<Value>) {
  let mut conds  = vec!["username = ?"];
  let mut params = vec![Value::Text(owner.to_owned())];

  for filter in filters {
    let (sql, values) = clause(filter);
    conds.push(sql);
    params.extend(values);
  }

  (format!("WHERE {}", conds.join(" AND ")), params)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn owner_only() {
    let (sql, params) = where_clause("alice", &[]);
    assert_eq!(sql, "WHERE username = ?");
    assert_eq!(params, vec![Value::Text("alice".into())]);
  }

  #[test]
  fn clauses_are_anded_in_order_with_one_param_per_placeholder() {
    let filters = [
      ContactFilter::NameContains("al".into()),
      ContactFilter::PhoneContains("555".into()),
    ];
    let (sql, params) = where_clause("alice", &filters);
    assert_eq!(
      sql,
      "WHERE username = ? AND (instr(first_name, ?) > 0 OR instr(last_name, ?) > 0) \
       AND instr(phone, ?) > 0"
    );
    assert_eq!(sql.matches('?').count(), params.len());
    assert_eq!(params[3], Value::Text("555".into()));
  }

  #[test]
  fn values_are_never_inlined() {
    let filters = [ContactFilter::EmailContains("'; DROP TABLE contacts; --".into())];
    let (sql, _) = where_clause("alice", &filters);
    assert!(!sql.contains("DROP"));
  }
}
