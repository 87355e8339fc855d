use std::sync::Arc;

use tracing::debug;
use validator::Validate as _;

use crate::{
  Error, Result,
  contact::{Contact, ContactRequest, ContactResponse},
  search::{Paging, SearchContactRequest, SearchResult},
  store::ContactStore,
};

const NOT_FOUND: &str = "Contact not found";

/// Contact use cases, scoped to the calling user.
pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The ownership gate shared by every contact-scoped operation, including
  /// the address ones: one lookup on (id, owner), `NotFound` otherwise.
  pub async fn contact_exists(&self, owner: &str, id: i64) -> Result<Contact> {
    self
      .store
      .find_contact(owner, id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  pub async fn create(
    &self,
    owner: &str,
    request: ContactRequest,
  ) -> Result<ContactResponse> {
    debug!(owner, ?request, "ContactService::create");
    request.validate()?;

    let contact = self
      .store
      .insert_contact(owner, request.into())
      .await
      .map_err(Error::store)?;
    Ok(contact.into())
  }

  pub async fn get(&self, owner: &str, id: i64) -> Result<ContactResponse> {
    debug!(owner, id, "ContactService::get");
    Ok(self.contact_exists(owner, id).await?.into())
  }

  /// Replaces `first_name` and whichever optional fields the request carries.
  pub async fn update(
    &self,
    owner: &str,
    id: i64,
    request: ContactRequest,
  ) -> Result<ContactResponse> {
    debug!(owner, id, ?request, "ContactService::update");
    request.validate()?;

    let contact = self.contact_exists(owner, id).await?;
    self
      .store
      .update_contact(owner, contact.id, request.into())
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  /// Returns the projection of the deleted contact.
  pub async fn remove(&self, owner: &str, id: i64) -> Result<ContactResponse> {
    debug!(owner, id, "ContactService::remove");

    let contact = self.contact_exists(owner, id).await?;
    self
      .store
      .delete_contact(owner, contact.id)
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  pub async fn search(
    &self,
    owner: &str,
    request: SearchContactRequest,
  ) -> Result<SearchResult> {
    debug!(owner, ?request, "ContactService::search");
    request.validate()?;

    let filters = request.filters();
    let contacts = self
      .store
      .search_contacts(owner, &filters, request.size, request.offset())
      .await
      .map_err(Error::store)?;
    let total = self
      .store
      .count_contacts(owner, &filters)
      .await
      .map_err(Error::store)?;

    Ok(SearchResult {
      data:   contacts.into_iter().map(Into::into).collect(),
      paging: Paging::new(request.page, request.size, total),
    })
  }
}
