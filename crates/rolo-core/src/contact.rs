//! Contact — the aggregate root of the store.
//!
//! A contact is a flat entity with a handful of optional scalar fields, an
//! optional embedded postal address, and an ordered tag list. Field names
//! serialise as camelCase and absent optionals are omitted, matching the
//! JSON wire shape clients consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A postal address embedded in a contact. Every sub-field is independently
/// optional; an address with no populated sub-field is treated as absent
/// (see [`Address::is_empty`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub street:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub city:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country:     Option<String>,
}

impl Address {
  /// True when no sub-field is set. Such an address encodes to all-NULL
  /// columns and is indistinguishable from an absent address on read.
  pub fn is_empty(&self) -> bool {
    self.street.is_none()
      && self.city.is_none()
      && self.state.is_none()
      && self.postal_code.is_none()
      && self.country.is_none()
  }
}

/// A persisted contact. `id` and `created_at` never change after creation;
/// `updated_at` is refreshed by every update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:           Uuid,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address:      Option<Address>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub company:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub job_title:    Option<String>,
  pub tags:         Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:        Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ContactStore::create`] and
/// [`crate::store::ContactStore::update`] — a contact minus identity and
/// timestamps, which are always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  #[serde(default)]
  pub phone_number: Option<String>,
  #[serde(default)]
  pub address:      Option<Address>,
  #[serde(default)]
  pub company:      Option<String>,
  #[serde(default)]
  pub job_title:    Option<String>,
  #[serde(default)]
  pub tags:         Vec<String>,
  #[serde(default)]
  pub notes:        Option<String>,
}
