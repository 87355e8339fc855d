use std::sync::Arc;

use tracing::debug;
use validator::Validate as _;

use crate::{
  Error, Result,
  credential::{generate_token, hash_password, token_digest, verify_password},
  store::ContactStore,
  user::{
    LoginUserRequest, NewUser, RegisterUserRequest, UpdateUserRequest, User,
    UserChanges, UserResponse,
  },
};

const BAD_CREDENTIALS: &str = "Username or password is invalid";
const UNAUTHORIZED: &str = "Unauthorized";

/// Registration, login sessions and profile updates.
pub struct UserService<S> {
  store: Arc<S>,
}

impl<S> Clone for UserService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: ContactStore> UserService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse> {
    debug!(username = %request.username, "UserService::register");
    request.validate()?;

    let new_user = NewUser {
      password_hash: hash_password(&request.password)?,
      username:      request.username,
      name:          request.name,
    };

    self
      .store
      .insert_user(new_user)
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or_else(|| Error::Conflict("Username already exists".to_string()))
  }

  /// Verify the password and start a new session, replacing any previous one.
  /// The response carries the plaintext token; only its digest is stored.
  pub async fn login(&self, request: LoginUserRequest) -> Result<UserResponse> {
    debug!(username = %request.username, "UserService::login");
    request.validate()?;

    let user = self
      .store
      .get_user(&request.username)
      .await
      .map_err(Error::store)?
      .filter(|u| verify_password(&request.password, &u.password_hash))
      .ok_or(Error::Unauthorized(BAD_CREDENTIALS))?;

    let token = generate_token();
    self
      .store
      .set_user_token(&user.username, Some(token_digest(&token)))
      .await
      .map_err(Error::store)?;

    Ok(UserResponse {
      token: Some(token),
      ..UserResponse::from(user)
    })
  }

  /// Resolve the caller behind a bearer token.
  pub async fn authenticate(&self, token: &str) -> Result<User> {
    if token.is_empty() {
      return Err(Error::Unauthorized(UNAUTHORIZED));
    }
    let digest = token_digest(token);
    self
      .store
      .get_user_by_token(&digest)
      .await
      .map_err(Error::store)?
      .ok_or(Error::Unauthorized(UNAUTHORIZED))
  }

  pub fn current(&self, user: User) -> UserResponse {
    debug!(username = %user.username, "UserService::current");
    user.into()
  }

  pub async fn update(
    &self,
    user: &User,
    request: UpdateUserRequest,
  ) -> Result<UserResponse> {
    debug!(username = %user.username, "UserService::update");
    request.validate()?;

    let changes = UserChanges {
      name:          request.name,
      password_hash: request
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?,
    };

    self
      .store
      .update_user(&user.username, changes)
      .await
      .map_err(Error::store)?
      .map(Into::into)
      .ok_or(Error::Unauthorized(UNAUTHORIZED))
  }

  /// End the caller's session.
  pub async fn logout(&self, user: &User) -> Result<()> {
    debug!(username = %user.username, "UserService::logout");
    self
      .store
      .set_user_token(&user.username, None)
      .await
      .map_err(Error::store)
  }
}
