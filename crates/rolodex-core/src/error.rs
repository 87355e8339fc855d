//! Error types for `rolodex-core`.

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more request fields failed their schema rules.
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  /// The entity is absent or owned by someone else. The message never says
  /// which.
  #[error("{0}")]
  NotFound(&'static str),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Unauthorized(&'static str),

  #[error("credential error: {0}")]
  Credential(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error. Shaped for `map_err(Error::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
