//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | `?page=&limit=&search=&tag=` |
//! | `POST`   | `/contacts`      | Body: `NewContact`; 409 on duplicate email |
//! | `GET`    | `/contacts/:id`  | 404 if not found |
//! | `PUT`    | `/contacts/:id`  | Full replace; 404 / 409 |
//! | `DELETE` | `/contacts/:id`  | 204 on success, 404 if not found |
//! | `POST`   | `/contacts/bulk` | `{"contacts": [...]}`, 1..=100 items |
//!
//! Input validation happens here, at the transport edge; the service and
//! store only ever see validated input.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use rolo_core::{
  contact::{Contact, NewContact},
  service::{ContactPage, ContactService, ListOptions},
  store::ContactStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

const MAX_NAME_LEN: usize = 50;
const MAX_BULK_ITEMS: usize = 100;

// ─── Validation ──────────────────────────────────────────────────────────────

fn validate(input: &NewContact) -> Result<(), String> {
  if input.first_name.is_empty() || input.first_name.len() > MAX_NAME_LEN {
    return Err(format!("firstName must be 1 to {MAX_NAME_LEN} characters"));
  }
  if input.last_name.is_empty() || input.last_name.len() > MAX_NAME_LEN {
    return Err(format!("lastName must be 1 to {MAX_NAME_LEN} characters"));
  }
  if input.email.is_empty() || !input.email.contains('@') {
    return Err("email must be a valid email address".to_string());
  }
  Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page:   Option<i64>,
  pub limit:  Option<i64>,
  pub search: Option<String>,
  pub tag:    Option<String>,
}

/// `GET /contacts[?page=..&limit=..&search=..&tag=..]`
pub async fn list<S>(
  State(service): State<Arc<ContactService<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<ContactPage>, ApiError>
where
  S: ContactStore,
{
  let page = service
    .list(ListOptions {
      page:   params.page.unwrap_or(1),
      limit:  params.limit.unwrap_or(0),
      search: params.search,
      tag:    params.tag,
    })
    .await?;
  Ok(Json(page))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /contacts` — body: `NewContact`
pub async fn create<S>(
  State(service): State<Arc<ContactService<S>>>,
  Json(input): Json<NewContact>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  validate(&input).map_err(ApiError::BadRequest)?;
  let contact = service.create(input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(service): State<Arc<ContactService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  Ok(Json(service.get(id).await?))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — full replace of all mutable fields.
pub async fn update<S>(
  State(service): State<Arc<ContactService<S>>>,
  Path(id): Path<Uuid>,
  Json(input): Json<NewContact>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  validate(&input).map_err(ApiError::BadRequest)?;
  Ok(Json(service.update(id, input).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete<S>(
  State(service): State<Arc<ContactService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Bulk create ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BulkCreateBody {
  pub contacts: Vec<NewContact>,
}

#[derive(Debug, Serialize)]
pub struct BulkItemError {
  pub index: usize,
  pub error: String,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
  pub created: Vec<Contact>,
  pub errors:  Vec<BulkItemError>,
}

/// `POST /contacts/bulk` — each item is created independently; one item's
/// failure is reported by index and never aborts its siblings.
pub async fn bulk_create<S>(
  State(service): State<Arc<ContactService<S>>>,
  Json(body): Json<BulkCreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  if body.contacts.is_empty() || body.contacts.len() > MAX_BULK_ITEMS {
    return Err(ApiError::BadRequest(format!(
      "contacts must contain 1 to {MAX_BULK_ITEMS} items"
    )));
  }

  let mut created = Vec::new();
  let mut errors = Vec::new();

  for (index, input) in body.contacts.into_iter().enumerate() {
    let result = match validate(&input) {
      Ok(()) => service.create(input).await.map_err(|e| e.to_string()),
      Err(message) => Err(message),
    };
    match result {
      Ok(contact) => created.push(contact),
      Err(error) => errors.push(BulkItemError { index, error }),
    }
  }

  Ok((StatusCode::CREATED, Json(BulkCreateResponse { created, errors })))
}
