//! `ContactService` — input normalization and bulk sequencing on top of a
//! [`ContactStore`].
//!
//! The service owns the two behaviours the transport layer should not:
//! clamping raw pagination input to sane bounds, and running bulk creates
//! item by item so one failure never aborts its siblings. Everything else
//! is a pass-through that converts the backend's error into the classified
//! taxonomy of [`crate::Error`].

use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  contact::{Contact, NewContact},
  store::{ContactQuery, ContactStore},
};

/// Page size applied when the caller asks for zero or fewer rows.
pub const DEFAULT_LIMIT: u32 = 20;
/// Upper bound on the page size; prevents unbounded result sets.
pub const MAX_LIMIT: u32 = 100;

// ─── List input and output ───────────────────────────────────────────────────

/// Raw, un-normalized list parameters as they arrive from the transport
/// layer. `page` and `limit` may be zero or negative.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
  pub page:   i64,
  pub limit:  i64,
  pub search: Option<String>,
  pub tag:    Option<String>,
}

/// Pagination arithmetic for one list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub page:         u32,
  pub limit:        u32,
  pub total:        u64,
  pub total_pages:  u64,
  pub has_next:     bool,
  pub has_previous: bool,
}

impl Pagination {
  pub fn new(page: u32, limit: u32, total: u64) -> Self {
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(u64::from(limit)) };
    Self {
      page,
      limit,
      total,
      total_pages,
      has_next: u64::from(page) < total_pages,
      has_previous: page > 1,
    }
  }
}

/// One page of contacts plus its pagination envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
  pub contacts:   Vec<Contact>,
  pub pagination: Pagination,
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct ContactService<S> {
  store: S,
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewContact) -> Result<Contact> {
    self.store.create(input).await.map_err(Into::into)
  }

  pub async fn get(&self, id: Uuid) -> Result<Contact> {
    self
      .store
      .get(id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::NotFound(id))
  }

  /// Normalize `options` and fetch one page.
  ///
  /// `page <= 0` becomes 1; `limit <= 0` becomes [`DEFAULT_LIMIT`], capped
  /// at [`MAX_LIMIT`]; empty filter strings are dropped entirely.
  pub async fn list(&self, options: ListOptions) -> Result<ContactPage> {
    let query = normalize(options);
    let (contacts, total) = self.store.list(&query).await.map_err(Into::into)?;
    Ok(ContactPage {
      contacts,
      pagination: Pagination::new(query.page, query.limit, total),
    })
  }

  pub async fn update(&self, id: Uuid, input: NewContact) -> Result<Contact> {
    self.store.update(id, input).await.map_err(Into::into)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete(id).await.map_err(Into::into)
  }

  /// Create each input independently, in order. The result sequence has the
  /// same length and order as `inputs`; a failed item is an `Err` in place,
  /// never an abort. Each success is durably committed on its own.
  pub async fn bulk_create(
    &self,
    inputs: Vec<NewContact>,
  ) -> Vec<Result<Contact>> {
    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
      results.push(self.create(input).await);
    }
    results
  }
}

fn normalize(options: ListOptions) -> ContactQuery {
  let page = if options.page <= 0 { 1 } else { options.page };
  let limit = if options.limit <= 0 {
    i64::from(DEFAULT_LIMIT)
  } else {
    options.limit.min(i64::from(MAX_LIMIT))
  };

  ContactQuery {
    page:   u32::try_from(page).unwrap_or(u32::MAX),
    limit:  limit as u32,
    search: options.search.filter(|s| !s.is_empty()),
    tag:    options.tag.filter(|t| !t.is_empty()),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
