//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rolo_core::{
  contact::{Contact, NewContact},
  store::{ContactQuery, ContactStore},
};

use crate::{
  Error, Result,
  encode::{RawContact, encode_dt, encode_tags, encode_uuid, split_address},
  query::build_list_query,
  schema::{CONTACT_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Contact`] into the `contacts` table.
  async fn insert(&self, contact: &Contact) -> Result<()> {
    let id_str         = encode_uuid(contact.id);
    let first_name     = contact.first_name.clone();
    let last_name      = contact.last_name.clone();
    let email          = contact.email.clone();
    let phone_number   = contact.phone_number.clone();
    let (street, city, state, postal_code, country) =
      split_address(contact.address.as_ref());
    let company        = contact.company.clone();
    let job_title      = contact.job_title.clone();
    let tags_str       = encode_tags(&contact.tags)?;
    let notes          = contact.notes.clone();
    let created_at_str = encode_dt(contact.created_at);
    let updated_at_str = encode_dt(contact.updated_at);

    let email_for_err = email.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             id, first_name, last_name, email, phone_number,
             address_street, address_city, address_state,
             address_postal_code, address_country,
             company, job_title, tags, notes, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
          rusqlite::params![
            id_str,
            first_name,
            last_name,
            email,
            phone_number,
            street,
            city,
            state,
            postal_code,
            country,
            company,
            job_title,
            tags_str,
            notes,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| classify_unique_violation(e, &email_for_err))?;
    Ok(())
  }
}

/// Translate a unique-constraint violation on `contacts.email` into
/// [`Error::DuplicateEmail`]; everything else stays a database error.
/// The constraint itself is the uniqueness enforcement — there is no
/// pre-check that could race with a concurrent insert.
fn classify_unique_violation(err: tokio_rusqlite::Error, email: &str) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, Some(msg))) = &err
    && code.code == rusqlite::ErrorCode::ConstraintViolation
    && msg.contains("contacts.email")
  {
    return Error::DuplicateEmail(email.to_owned());
  }
  Error::Database(err)
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewContact) -> Result<Contact> {
    let now = Utc::now();
    let contact = Contact {
      id:           Uuid::new_v4(),
      first_name:   input.first_name,
      last_name:    input.last_name,
      email:        input.email,
      phone_number: input.phone_number,
      address:      input.address,
      company:      input.company,
      job_title:    input.job_title,
      tags:         input.tags,
      notes:        input.notes,
      created_at:   now,
      updated_at:   now,
    };

    self.insert(&contact).await?;
    Ok(contact)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list(&self, query: &ContactQuery) -> Result<(Vec<Contact>, u64)> {
    let q = build_list_query(query);

    // Count and fetch are two statements on one connection; a concurrent
    // write between them can skew the total by that write. Accepted.
    let (raws, total): (Vec<RawContact>, i64) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &q.count_sql,
          rusqlite::params_from_iter(q.count_args),
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&q.page_sql)?;
        let raws = stmt
          .query_map(
            rusqlite::params_from_iter(q.page_args),
            RawContact::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((raws, total))
      })
      .await?;

    let contacts = raws
      .into_iter()
      .map(RawContact::into_contact)
      .collect::<Result<Vec<_>>>()?;

    Ok((contacts, total as u64))
  }

  async fn update(&self, id: Uuid, input: NewContact) -> Result<Contact> {
    let id_str         = encode_uuid(id);
    let first_name     = input.first_name;
    let last_name      = input.last_name;
    let email          = input.email;
    let phone_number   = input.phone_number;
    let (street, city, state, postal_code, country) =
      split_address(input.address.as_ref());
    let company        = input.company;
    let job_title      = input.job_title;
    let tags_str       = encode_tags(&input.tags)?;
    let notes          = input.notes;
    let updated_at_str = encode_dt(Utc::now());

    let email_for_err = email.clone();
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET
             first_name = ?1, last_name = ?2, email = ?3, phone_number = ?4,
             address_street = ?5, address_city = ?6, address_state = ?7,
             address_postal_code = ?8, address_country = ?9,
             company = ?10, job_title = ?11, tags = ?12, notes = ?13,
             updated_at = ?14
           WHERE id = ?15",
          rusqlite::params![
            first_name,
            last_name,
            email,
            phone_number,
            street,
            city,
            state,
            postal_code,
            country,
            company,
            job_title,
            tags_str,
            notes,
            updated_at_str,
            id_str,
          ],
        )?)
      })
      .await
      .map_err(|e| classify_unique_violation(e, &email_for_err))?;

    if affected == 0 {
      return Err(Error::NotFound(id));
    }

    // Read-after-write: return what the database actually holds rather than
    // trusting the write call's feedback.
    self.get(id).await?.ok_or(Error::NotFound(id))
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }
}
