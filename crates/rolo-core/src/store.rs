//! The `ContactStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `rolo-store-sqlite`).
//! Higher layers (`rolo-api`, the service) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::contact::{Contact, NewContact};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Normalized parameters for [`ContactStore::list`].
///
/// Callers go through [`crate::service::ContactService::list`], which clamps
/// page/limit and drops empty filter strings before this type is built. The
/// store takes the values verbatim: `limit == 0` yields no rows.
#[derive(Debug, Clone)]
pub struct ContactQuery {
  /// 1-based page number.
  pub page:   u32,
  /// Rows per page.
  pub limit:  u32,
  /// Substring match over first name, last name, and email.
  pub search: Option<String>,
  /// Exact-element match against the contact's tag list.
  pub tag:    Option<String>,
}

impl Default for ContactQuery {
  fn default() -> Self {
    Self {
      page:   1,
      limit:  crate::service::DEFAULT_LIMIT,
      search: None,
      tag:    None,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a contact storage backend.
///
/// The backend assigns identity and timestamps, enforces email uniqueness
/// through its own constraint (never a check-then-insert), and classifies
/// low-level failures into its `Error` type exactly once. `Into<crate::Error>`
/// on that type is how the classification reaches higher layers unchanged.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Persist a new contact. The id and both timestamps are assigned here.
  /// Fails with the backend's duplicate-email classification if the email
  /// is already taken.
  fn create(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Return one page of contacts matching `query`, newest first, plus the
  /// total matching count unfiltered by pagination.
  ///
  /// The count and the page are two statements sharing one predicate; a
  /// write landing between them can leave the total off by that write.
  /// Accepted, bounded staleness.
  fn list<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<(Vec<Contact>, u64), Self::Error>> + Send + 'a;

  /// Replace every mutable field of the contact with `input`, refresh
  /// `updated_at`, and return the stored entity re-read from the backend.
  /// `id` and `created_at` are untouched.
  fn update(
    &self,
    id: Uuid,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Hard-delete a contact. Deleting an id with no row is an error, decided
  /// from the rows-affected count.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
