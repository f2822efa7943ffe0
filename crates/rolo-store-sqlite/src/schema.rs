//! SQL schema for the rolo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id                  TEXT PRIMARY KEY,
    first_name          TEXT NOT NULL,
    last_name           TEXT NOT NULL,
    email               TEXT NOT NULL UNIQUE,
    phone_number        TEXT,
    address_street      TEXT,
    address_city        TEXT,
    address_state       TEXT,
    address_postal_code TEXT,
    address_country     TEXT,
    company             TEXT,
    job_title           TEXT,
    tags                TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    notes               TEXT,
    created_at          TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    updated_at          TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_email_idx   ON contacts(email);
CREATE INDEX IF NOT EXISTS contacts_name_idx    ON contacts(first_name, last_name);
CREATE INDEX IF NOT EXISTS contacts_company_idx ON contacts(company);

PRAGMA user_version = 1;
";

/// Column list shared by every SELECT that reads a full contact row. Order
/// must match [`crate::encode::RawContact::from_row`].
pub const CONTACT_COLUMNS: &str = "id, first_name, last_name, email, phone_number, \
   address_street, address_city, address_state, address_postal_code, address_country, \
   company, job_title, tags, notes, created_at, updated_at";
