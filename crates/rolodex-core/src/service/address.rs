use std::sync::Arc;

use tracing::debug;
use validator::Validate as _;

use crate::{
  Error, Result,
  address::{Address, AddressRequest, AddressResponse},
  service::ContactService,
  store::ContactStore,
};

const NOT_FOUND: &str = "Address is not found";

/// Address use cases. Every call first passes the parent contact through
/// [`ContactService::contact_exists`], so an address under someone else's
/// contact is never reached.
pub struct AddressService<S> {
  store:    Arc<S>,
  contacts: ContactService<S>,
}

impl<S> Clone for AddressService<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      contacts: self.contacts.clone(),
    }
  }
}

impl<S: ContactStore> AddressService<S> {
  pub fn new(store: Arc<S>, contacts: ContactService<S>) -> Self {
    Self { store, contacts }
  }

  async fn address_exists(&self, contact_id: i64, id: i64) -> Result<Address> {
    self
      .store
      .find_address(contact_id, id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  pub async fn create(
    &self,
    owner: &str,
    contact_id: i64,
    request: AddressRequest,
  ) -> Result<AddressResponse> {
    debug!(owner, contact_id, ?request, "AddressService::create");
    request.validate()?;

    let contact = self.contacts.contact_exists(owner, contact_id).await?;
    let address = self
      .store
      .insert_address(contact.id, request.into())
      .await
      .map_err(Error::store)?;
    Ok(address.into())
  }

  pub async fn get(
    &self,
    owner: &str,
    contact_id: i64,
    address_id: i64,
  ) -> Result<AddressResponse> {
    debug!(owner, contact_id, address_id, "AddressService::get");

    let contact = self.contacts.contact_exists(owner, contact_id).await?;
    Ok(self.address_exists(contact.id, address_id).await?.into())
  }

  /// Full replace of the address's fields.
  pub async fn update(
    &self,
    owner: &str,
    contact_id: i64,
    address_id: i64,
    request: AddressRequest,
  ) -> Result<AddressResponse> {
    debug!(owner, contact_id, address_id, ?request, "AddressService::update");
    request.validate()?;

    let contact = self.contacts.contact_exists(owner, contact_id).await?;
    let address = self.address_exists(contact.id, address_id).await?;
    self
      .store
      .update_address(contact.id, address.id, request.into())
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  pub async fn remove(
    &self,
    owner: &str,
    contact_id: i64,
    address_id: i64,
  ) -> Result<AddressResponse> {
    debug!(owner, contact_id, address_id, "AddressService::remove");

    let contact = self.contacts.contact_exists(owner, contact_id).await?;
    let address = self.address_exists(contact.id, address_id).await?;
    self
      .store
      .delete_address(contact.id, address.id)
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or(Error::NotFound(NOT_FOUND))
  }

  pub async fn list(
    &self,
    owner: &str,
    contact_id: i64,
  ) -> Result<Vec<AddressResponse>> {
    debug!(owner, contact_id, "AddressService::list");

    let contact = self.contacts.contact_exists(owner, contact_id).await?;
    let addresses = self
      .store
      .list_addresses(contact.id)
      .await
      .map_err(Error::store)?;
    Ok(addresses.into_iter().map(Into::into).collect())
  }
}
