//! JSON REST API for rolo.
//!
//! Exposes an axum [`Router`] backed by any [`rolo_core::store::ContactStore`]
//! through a [`ContactService`]. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", rolo_api::api_router(service.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use rolo_core::{service::ContactService, store::ContactStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ContactService<S>>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route("/contacts/bulk", post(contacts::bulk_create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rolo_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn test_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(ContactService::new(store)))
  }

  async fn send(
    router: Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn contact_body(first: &str, last: &str, email: &str) -> Value {
    json!({ "firstName": first, "lastName": last, "email": email })
  }

  // ── Create ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_assigned_identity() {
    let router = test_router().await;
    let (status, body) = send(
      router,
      "POST",
      "/contacts",
      Some(contact_body("Ada", "Lovelace", "ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["tags"], json!([]));
    assert!(body["createdAt"].as_str().is_some());
    assert_eq!(body["createdAt"], body["updatedAt"]);
    // Absent optionals are omitted, not null.
    assert!(body.get("phoneNumber").is_none());
    assert!(body.get("address").is_none());
  }

  #[tokio::test]
  async fn create_duplicate_email_returns_409() {
    let router = test_router().await;
    send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("A", "One", "same@example.com")),
    )
    .await;

    let (status, body) = send(
      router,
      "POST",
      "/contacts",
      Some(contact_body("B", "Two", "same@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("email"));
  }

  #[tokio::test]
  async fn create_invalid_input_returns_400() {
    let router = test_router().await;

    let (status, _) = send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("", "Lovelace", "ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      router,
      "POST",
      "/contacts",
      Some(contact_body("Ada", "Lovelace", "not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Get ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_returns_the_stored_contact() {
    let router = test_router().await;
    let mut input = contact_body("Alice", "Liddell", "alice@example.com");
    input["address"] = json!({ "city": "Oxford", "country": "GB" });
    input["tags"] = json!(["friend"]);

    let (_, created) = send(router.clone(), "POST", "/contacts", Some(input)).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) =
      send(router, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["address"]["city"], "Oxford");
    assert!(body["address"].get("street").is_none());
    assert_eq!(body["tags"], json!(["friend"]));
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let router = test_router().await;
    let (status, body) = send(
      router,
      "GET",
      &format!("/contacts/{}", Uuid::new_v4()),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().is_some());
  }

  // ── Update ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_replaces_the_contact() {
    let router = test_router().await;
    let (_, created) = send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("Old", "Name", "old@example.com")),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
      router,
      "PUT",
      &format!("/contacts/{id}"),
      Some(contact_body("New", "Name", "new@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "New");
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["createdAt"], created["createdAt"]);
  }

  #[tokio::test]
  async fn put_missing_returns_404() {
    let router = test_router().await;
    let (status, _) = send(
      router,
      "PUT",
      &format!("/contacts/{}", Uuid::new_v4()),
      Some(contact_body("X", "Y", "x@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn put_email_collision_returns_409_and_leaves_row_unchanged() {
    let router = test_router().await;
    send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("A", "One", "a@example.com")),
    )
    .await;
    let (_, b) = send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("B", "Two", "b@example.com")),
    )
    .await;
    let b_id = b["id"].as_str().unwrap();

    let (status, _) = send(
      router.clone(),
      "PUT",
      &format!("/contacts/{b_id}"),
      Some(contact_body("B", "Two", "a@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(router, "GET", &format!("/contacts/{b_id}"), None).await;
    assert_eq!(body["email"], "b@example.com");
  }

  // ── Delete ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_returns_204_then_404() {
    let router = test_router().await;
    let (_, created) = send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("Gone", "Soon", "gone@example.com")),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) =
      send(router.clone(), "DELETE", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) =
      send(router.clone(), "DELETE", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(router, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── List ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_pagination_envelope() {
    let router = test_router().await;
    for n in 0..25 {
      send(
        router.clone(),
        "POST",
        "/contacts",
        Some(contact_body("P", &n.to_string(), &format!("p{n}@example.com"))),
      )
      .await;
    }

    let (status, body) = send(router.clone(), "GET", "/contacts?limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 10);
    assert_eq!(
      body["pagination"],
      json!({
        "page": 1, "limit": 10, "total": 25,
        "totalPages": 3, "hasNext": true, "hasPrevious": false
      })
    );

    let (_, body) = send(router.clone(), "GET", "/contacts?limit=10&page=3", None).await;
    assert_eq!(body["contacts"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["hasNext"], json!(false));
    assert_eq!(body["pagination"]["hasPrevious"], json!(true));

    // Non-positive and oversized limits are normalized, not an error.
    let (status, body) = send(router.clone(), "GET", "/contacts?limit=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["limit"], json!(20));

    let (_, body) = send(router, "GET", "/contacts?limit=1000", None).await;
    assert_eq!(body["pagination"]["limit"], json!(100));
  }

  #[tokio::test]
  async fn list_filters_by_search_and_tag() {
    let router = test_router().await;
    let mut cat = contact_body("Cat", "Owner", "cat@example.com");
    cat["tags"] = json!(["cat"]);
    send(router.clone(), "POST", "/contacts", Some(cat)).await;

    let mut a = contact_body("Plain", "Tag", "plain@example.com");
    a["tags"] = json!(["a"]);
    send(router.clone(), "POST", "/contacts", Some(a)).await;

    // Tag filtering matches whole elements: "a" must not match "cat".
    let (_, body) = send(router.clone(), "GET", "/contacts?tag=a", None).await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["contacts"][0]["email"], "plain@example.com");

    let (_, body) = send(router, "GET", "/contacts?search=owner", None).await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["contacts"][0]["firstName"], "Cat");
  }

  // ── Bulk create ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn bulk_create_reports_per_item_outcomes() {
    let router = test_router().await;
    send(
      router.clone(),
      "POST",
      "/contacts",
      Some(contact_body("Taken", "Already", "dup@example.com")),
    )
    .await;

    let (status, body) = send(
      router.clone(),
      "POST",
      "/contacts/bulk",
      Some(json!({
        "contacts": [
          contact_body("One", "Ok", "one@example.com"),
          contact_body("Two", "Dup", "dup@example.com"),
          contact_body("Three", "Ok", "three@example.com"),
        ]
      })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body["created"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["email"], "one@example.com");
    assert_eq!(created[1]["email"], "three@example.com");

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], json!(1));

    // Successes on either side of the failure are durably committed.
    let (_, body) = send(router, "GET", "/contacts", None).await;
    assert_eq!(body["pagination"]["total"], json!(4));
  }

  #[tokio::test]
  async fn bulk_create_rejects_empty_and_oversized_envelopes() {
    let router = test_router().await;

    let (status, _) = send(
      router.clone(),
      "POST",
      "/contacts/bulk",
      Some(json!({ "contacts": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let contacts: Vec<Value> = (0..101)
      .map(|n| contact_body("N", &n.to_string(), &format!("n{n}@example.com")))
      .collect();
    let (status, _) = send(
      router,
      "POST",
      "/contacts/bulk",
      Some(json!({ "contacts": contacts })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn bulk_create_flags_invalid_items_by_index() {
    let router = test_router().await;
    let (status, body) = send(
      router,
      "POST",
      "/contacts/bulk",
      Some(json!({
        "contacts": [
          contact_body("Ok", "Item", "ok@example.com"),
          contact_body("Bad", "Email", "not-an-email"),
        ]
      })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["index"], json!(1));
  }
}
