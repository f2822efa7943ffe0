//! Error type for `rolo-store-sqlite`.
//!
//! Low-level failures are classified here, once. The `From` impl into
//! [`rolo_core::Error`] is what the rest of the system sees; anything that
//! is not a not-found or a duplicate email collapses into the storage class.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  NotFound(Uuid),

  #[error("a contact with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<Error> for rolo_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::NotFound(id) => Self::NotFound(id),
      Error::DuplicateEmail(email) => Self::DuplicateEmail(email),
      other => Self::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
