//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. The tag list is stored as a
//! compact JSON array. UUIDs are stored as hyphenated lowercase strings. The
//! five address columns are independently nullable; an address exists on read
//! iff at least one of them is non-null.

use chrono::{DateTime, Utc};
use rolo_core::contact::{Address, Contact};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Tags ────────────────────────────────────────────────────────────────────

/// Empty tags encode to `[]`, never NULL.
pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

/// A NULL or empty column decodes to an empty tag list, not an error.
pub fn decode_tags(s: Option<&str>) -> Result<Vec<String>> {
  match s {
    None | Some("") => Ok(Vec::new()),
    Some(json) => Ok(serde_json::from_str(json)?),
  }
}

// ─── Address ─────────────────────────────────────────────────────────────────

/// Split an optional address into its five column values. An absent or
/// all-`None` address becomes five NULLs.
pub fn split_address(
  address: Option<&Address>,
) -> (
  Option<String>,
  Option<String>,
  Option<String>,
  Option<String>,
  Option<String>,
) {
  match address {
    Some(a) => (
      a.street.clone(),
      a.city.clone(),
      a.state.clone(),
      a.postal_code.clone(),
      a.country.clone(),
    ),
    None => (None, None, None, None, None),
  }
}

/// Rebuild the address from its columns. `Some` iff at least one column is
/// non-null; never a `Some(Address)` with every sub-field `None`.
pub fn assemble_address(
  street:      Option<String>,
  city:        Option<String>,
  state:       Option<String>,
  postal_code: Option<String>,
  country:     Option<String>,
) -> Option<Address> {
  let address = Address { street, city, state, postal_code, country };
  if address.is_empty() { None } else { Some(address) }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `contacts` row, column order per
/// [`crate::schema::CONTACT_COLUMNS`].
pub struct RawContact {
  pub id:                  String,
  pub first_name:          String,
  pub last_name:           String,
  pub email:               String,
  pub phone_number:        Option<String>,
  pub address_street:      Option<String>,
  pub address_city:        Option<String>,
  pub address_state:       Option<String>,
  pub address_postal_code: Option<String>,
  pub address_country:     Option<String>,
  pub company:             Option<String>,
  pub job_title:           Option<String>,
  pub tags:                Option<String>,
  pub notes:               Option<String>,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      first_name:          row.get(1)?,
      last_name:           row.get(2)?,
      email:               row.get(3)?,
      phone_number:        row.get(4)?,
      address_street:      row.get(5)?,
      address_city:        row.get(6)?,
      address_state:       row.get(7)?,
      address_postal_code: row.get(8)?,
      address_country:     row.get(9)?,
      company:             row.get(10)?,
      job_title:           row.get(11)?,
      tags:                row.get(12)?,
      notes:               row.get(13)?,
      created_at:          row.get(14)?,
      updated_at:          row.get(15)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:           decode_uuid(&self.id)?,
      first_name:   self.first_name,
      last_name:    self.last_name,
      email:        self.email,
      phone_number: self.phone_number,
      address:      assemble_address(
        self.address_street,
        self.address_city,
        self.address_state,
        self.address_postal_code,
        self.address_country,
      ),
      company:      self.company,
      job_title:    self.job_title,
      tags:         decode_tags(self.tags.as_deref())?,
      notes:        self.notes,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
