//! Error types for `rolo-core`.
//!
//! This is the classified taxonomy every layer above the store speaks.
//! Storage backends detect and classify their own low-level failures once
//! (via `Into<Error>` on the trait's associated error type); nothing above
//! them re-inspects driver errors.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  NotFound(Uuid),

  #[error("a contact with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
