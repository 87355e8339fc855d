//! Integration tests for `SqliteStore` and the core services running on it,
//! against an in-memory database.

use std::sync::Arc;

use rolodex_core::{
  Error,
  address::{AddressFields, AddressRequest},
  contact::{ContactFields, ContactRequest},
  search::{ContactFilter, SearchContactRequest},
  service::{AddressService, ContactService, UserService},
  store::ContactStore,
  user::{LoginUserRequest, NewUser, RegisterUserRequest, UpdateUserRequest, UserChanges},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn store_with_users(names: &[&str]) -> SqliteStore {
  let s = store().await;
  for name in names {
    s.insert_user(NewUser {
      username:      (*name).into(),
      password_hash: "hash".into(),
      name:          (*name).into(),
    })
    .await
    .unwrap()
    .expect("fresh username");
  }
  s
}

fn fields(first: &str, last: Option<&str>) -> ContactFields {
  ContactFields {
    first_name: first.into(),
    last_name:  last.map(Into::into),
    email:      None,
    phone:      None,
  }
}

fn address(street: &str) -> AddressFields {
  AddressFields {
    street:      street.into(),
    city:        "test".into(),
    province:    "test".into(),
    country:     "test".into(),
    postal_code: "1212".into(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_user_rejects_duplicate_username() {
  let s = store_with_users(&["test"]).await;
  let again = s
    .insert_user(NewUser {
      username:      "test".into(),
      password_hash: "other".into(),
      name:          "other".into(),
    })
    .await
    .unwrap();
  assert!(again.is_none());

  let stored = s.get_user("test").await.unwrap().unwrap();
  assert_eq!(stored.password_hash, "hash");
}

#[tokio::test]
async fn token_lookup_follows_set_and_clear() {
  let s = store_with_users(&["test"]).await;
  assert!(s.get_user_by_token("digest").await.unwrap().is_none());

  s.set_user_token("test", Some("digest".into())).await.unwrap();
  let user = s.get_user_by_token("digest").await.unwrap().unwrap();
  assert_eq!(user.username, "test");

  s.set_user_token("test", None).await.unwrap();
  assert!(s.get_user_by_token("digest").await.unwrap().is_none());
}

#[tokio::test]
async fn update_user_keeps_unchanged_columns() {
  let s = store_with_users(&["test"]).await;
  let updated = s
    .update_user("test", UserChanges { name: Some("renamed".into()), password_hash: None })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.name, "renamed");
  assert_eq!(updated.password_hash, "hash");

  let missing = s.update_user("nobody", UserChanges::default()).await.unwrap();
  assert!(missing.is_none());
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_lookup_is_scoped_to_owner() {
  let s = store_with_users(&["alice", "bob"]).await;
  let c = s.insert_contact("alice", fields("Carol", None)).await.unwrap();

  assert_eq!(s.find_contact("alice", c.id).await.unwrap(), Some(c.clone()));
  assert!(s.find_contact("bob", c.id).await.unwrap().is_none());
  assert!(s.update_contact("bob", c.id, fields("X", None)).await.unwrap().is_none());
  assert!(s.delete_contact("bob", c.id).await.unwrap().is_none());
  assert!(s.find_contact("alice", c.id).await.unwrap().is_some());
}

#[tokio::test]
async fn update_contact_keeps_omitted_optionals() {
  let s = store_with_users(&["alice"]).await;
  let mut f = fields("Carol", Some("Smith"));
  f.email = Some("carol@example.com".into());
  let c = s.insert_contact("alice", f).await.unwrap();

  let updated = s
    .update_contact("alice", c.id, fields("Caroline", None))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.first_name, "Caroline");
  assert_eq!(updated.last_name.as_deref(), Some("Smith"));
  assert_eq!(updated.email.as_deref(), Some("carol@example.com"));
  assert_eq!(updated.phone, None);

  let mut f = fields("Caroline", Some("Jones"));
  f.phone = Some("0899".into());
  let updated = s.update_contact("alice", c.id, f).await.unwrap().unwrap();
  assert_eq!(updated.last_name.as_deref(), Some("Jones"));
  assert_eq!(updated.email.as_deref(), Some("carol@example.com"));
  assert_eq!(updated.phone.as_deref(), Some("0899"));
}

#[tokio::test]
async fn deleting_contact_cascades_to_addresses() {
  let s = store_with_users(&["alice"]).await;
  let c = s.insert_contact("alice", fields("Carol", None)).await.unwrap();
  let a = s.insert_address(c.id, address("Main St")).await.unwrap();

  let deleted = s.delete_contact("alice", c.id).await.unwrap().unwrap();
  assert_eq!(deleted.id, c.id);
  assert!(s.find_address(c.id, a.id).await.unwrap().is_none());
  assert!(s.list_addresses(c.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_applies_filters_and_paging_while_count_ignores_paging() {
  let s = store_with_users(&["alice", "bob"]).await;
  for i in 0..5 {
    s.insert_contact("alice", fields(&format!("Ann{i}"), None)).await.unwrap();
  }
  s.insert_contact("alice", fields("Zed", Some("Annerson"))).await.unwrap();
  s.insert_contact("alice", fields("Zoe", None)).await.unwrap();
  s.insert_contact("bob", fields("Ann", None)).await.unwrap();

  let filters = [ContactFilter::NameContains("Ann".into())];
  let page = s.search_contacts("alice", &filters, 4, 4).await.unwrap();
  let total = s.count_contacts("alice", &filters).await.unwrap();

  assert_eq!(total, 6);
  assert_eq!(page.len(), 2);
  assert!(page.iter().all(|c| filters[0].matches(c)));
  assert!(page.iter().all(|c| c.username == "alice"));
}

#[tokio::test]
async fn search_is_case_sensitive_and_skips_null_columns() {
  let s = store_with_users(&["alice"]).await;
  let mut f = fields("Carol", None);
  f.email = Some("carol@example.com".into());
  s.insert_contact("alice", f).await.unwrap();
  s.insert_contact("alice", fields("Dan", None)).await.unwrap();

  let upper = [ContactFilter::EmailContains("EXAMPLE".into())];
  assert_eq!(s.count_contacts("alice", &upper).await.unwrap(), 0);

  let lower = [ContactFilter::EmailContains("example".into())];
  assert_eq!(s.count_contacts("alice", &lower).await.unwrap(), 1);
}

// ─── Addresses ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn address_lookup_is_scoped_to_contact() {
  let s = store_with_users(&["alice"]).await;
  let c1 = s.insert_contact("alice", fields("One", None)).await.unwrap();
  let c2 = s.insert_contact("alice", fields("Two", None)).await.unwrap();
  let a = s.insert_address(c1.id, address("Main St")).await.unwrap();

  assert!(s.find_address(c2.id, a.id).await.unwrap().is_none());
  assert!(s.update_address(c2.id, a.id, address("X")).await.unwrap().is_none());
  assert!(s.delete_address(c2.id, a.id).await.unwrap().is_none());

  let updated = s.update_address(c1.id, a.id, address("Side St")).await.unwrap().unwrap();
  assert_eq!(updated.street, "Side St");
  assert_eq!(s.list_addresses(c1.id).await.unwrap(), vec![updated]);
}

// ─── Services ────────────────────────────────────────────────────────────────

struct Services {
  users:     UserService<SqliteStore>,
  contacts:  ContactService<SqliteStore>,
  addresses: AddressService<SqliteStore>,
}

async fn services(names: &[&str]) -> Services {
  let store    = Arc::new(store_with_users(names).await);
  let contacts = ContactService::new(Arc::clone(&store));
  Services {
    users:     UserService::new(Arc::clone(&store)),
    addresses: AddressService::new(Arc::clone(&store), contacts.clone()),
    contacts,
  }
}

fn contact_request(first: &str) -> ContactRequest {
  ContactRequest { first_name: first.into(), ..Default::default() }
}

fn address_request(value: &str, postal_code: &str) -> AddressRequest {
  AddressRequest {
    street:      value.into(),
    city:        value.into(),
    province:    value.into(),
    country:     value.into(),
    postal_code: postal_code.into(),
  }
}

#[tokio::test]
async fn register_login_authenticate_logout() {
  let svc = services(&[]).await;
  let registered = svc
    .users
    .register(RegisterUserRequest {
      username: "test".into(),
      password: "test".into(),
      name:     "test".into(),
    })
    .await
    .unwrap();
  assert_eq!(registered.username, "test");
  assert!(registered.token.is_none());

  let dup = svc
    .users
    .register(RegisterUserRequest {
      username: "test".into(),
      password: "x".into(),
      name:     "x".into(),
    })
    .await;
  assert!(matches!(dup, Err(Error::Conflict(_))));

  let bad = svc
    .users
    .login(LoginUserRequest { username: "test".into(), password: "nope".into() })
    .await;
  assert!(matches!(bad, Err(Error::Unauthorized(_))));

  let session = svc
    .users
    .login(LoginUserRequest { username: "test".into(), password: "test".into() })
    .await
    .unwrap();
  let token = session.token.unwrap();
  let user = svc.users.authenticate(&token).await.unwrap();
  assert_eq!(user.username, "test");

  svc.users.logout(&user).await.unwrap();
  assert!(matches!(
    svc.users.authenticate(&token).await,
    Err(Error::Unauthorized(_))
  ));
}

#[tokio::test]
async fn user_update_changes_password() {
  let svc = services(&[]).await;
  svc
    .users
    .register(RegisterUserRequest {
      username: "test".into(),
      password: "old".into(),
      name:     "test".into(),
    })
    .await
    .unwrap();
  let session = svc
    .users
    .login(LoginUserRequest { username: "test".into(), password: "old".into() })
    .await
    .unwrap();
  let user = svc.users.authenticate(&session.token.unwrap()).await.unwrap();

  let updated = svc
    .users
    .update(&user, UpdateUserRequest { name: Some("Tess".into()), password: Some("new".into()) })
    .await
    .unwrap();
  assert_eq!(updated.name, "Tess");

  assert!(svc
    .users
    .login(LoginUserRequest { username: "test".into(), password: "new".into() })
    .await
    .is_ok());
}

#[tokio::test]
async fn invalid_contact_is_rejected_and_nothing_is_stored() {
  let svc = services(&["alice"]).await;
  let result = svc.contacts.create("alice", contact_request("")).await;
  assert!(matches!(result, Err(Error::Validation(_))));

  let page = svc.contacts.search("alice", SearchContactRequest::default()).await.unwrap();
  assert!(page.data.is_empty());
  assert_eq!(page.paging.total_page, 0);
}

#[tokio::test]
async fn create_then_get_round_trips_and_delete_hides() {
  let svc = services(&["alice"]).await;
  let created = svc.contacts.create("alice", contact_request("test")).await.unwrap();
  let fetched = svc.contacts.get("alice", created.id).await.unwrap();
  assert_eq!(created, fetched);

  let removed = svc.contacts.remove("alice", created.id).await.unwrap();
  assert_eq!(removed, created);
  assert!(matches!(
    svc.contacts.get("alice", created.id).await,
    Err(Error::NotFound(_))
  ));
  assert!(matches!(
    svc.contacts.remove("alice", created.id).await,
    Err(Error::NotFound(_))
  ));
}

#[tokio::test]
async fn foreign_contact_is_not_found_for_every_operation() {
  let svc = services(&["alice", "mallory"]).await;
  let c = svc.contacts.create("alice", contact_request("test")).await.unwrap();
  let a = svc
    .addresses
    .create("alice", c.id, address_request("test", "1212"))
    .await
    .unwrap();

  let not_found = |r: Result<_, Error>| matches!(r, Err(Error::NotFound("Contact not found")));

  assert!(not_found(svc.contacts.get("mallory", c.id).await.map(|_| ())));
  assert!(not_found(svc.contacts.update("mallory", c.id, contact_request("x")).await.map(|_| ())));
  assert!(not_found(svc.contacts.remove("mallory", c.id).await.map(|_| ())));
  assert!(not_found(
    svc.addresses.create("mallory", c.id, address_request("x", "1")).await.map(|_| ())
  ));
  assert!(not_found(svc.addresses.get("mallory", c.id, a.id).await.map(|_| ())));
  assert!(not_found(
    svc.addresses.update("mallory", c.id, a.id, address_request("x", "1")).await.map(|_| ())
  ));
  assert!(not_found(svc.addresses.remove("mallory", c.id, a.id).await.map(|_| ())));
  assert!(not_found(svc.addresses.list("mallory", c.id).await.map(|_| ())));

  // Still intact for the owner.
  assert_eq!(svc.addresses.get("alice", c.id, a.id).await.unwrap(), a);
}

#[tokio::test]
async fn search_reports_total_pages_and_empty_page_past_the_end() {
  let svc = services(&["alice"]).await;
  for i in 0..12 {
    svc.contacts.create("alice", contact_request(&format!("name{i}"))).await.unwrap();
  }

  let first = svc.contacts.search("alice", SearchContactRequest::default()).await.unwrap();
  assert_eq!(first.data.len(), 10);
  assert_eq!(first.paging.total_page, 2);
  assert_eq!(first.paging.current_page, 1);

  let beyond = svc
    .contacts
    .search("alice", SearchContactRequest { page: 3, ..Default::default() })
    .await
    .unwrap();
  assert!(beyond.data.is_empty());
  assert_eq!(beyond.paging.total_page, 2);

  let invalid = svc
    .contacts
    .search("alice", SearchContactRequest { size: 0, ..Default::default() })
    .await;
  assert!(matches!(invalid, Err(Error::Validation(_))));
}

#[tokio::test]
async fn address_scenario() {
  let svc = services(&["test"]).await;
  let c = svc.contacts.create("test", contact_request("test")).await.unwrap();

  let created = svc
    .addresses
    .create("test", c.id, address_request("test", "1212"))
    .await
    .unwrap();
  assert_eq!(created.postal_code, "1212");
  assert_eq!(svc.addresses.get("test", c.id, created.id).await.unwrap(), created);

  let updated = svc
    .addresses
    .update("test", c.id, created.id, address_request("test update", "12122"))
    .await
    .unwrap();
  assert_eq!(updated.street, "test update");
  assert_eq!(updated.postal_code, "12122");

  let missing = svc.addresses.get("test", c.id, created.id + 1).await;
  assert!(matches!(missing, Err(Error::NotFound("Address is not found"))));

  svc.addresses.remove("test", c.id, created.id).await.unwrap();
  assert!(matches!(
    svc.addresses.get("test", c.id, created.id).await,
    Err(Error::NotFound(_))
  ));
  assert!(svc.addresses.list("test", c.id).await.unwrap().is_empty());
}
