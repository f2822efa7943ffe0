//! List query construction: one filter predicate shared by the count and
//! page statements, so total and page results agree on what matches.
//!
//! The tag filter matches a distinct element of the JSON-encoded tag column
//! via `json_each`, not a substring of its serialised text — `tag=a` must
//! not match a contact tagged `cat`.

use rolo_core::store::ContactQuery;
use rusqlite::types::Value;

use crate::schema::CONTACT_COLUMNS;

/// The count and page SQL for one [`ContactQuery`], with positional args.
pub struct ListQuery {
  pub count_sql:  String,
  pub count_args: Vec<Value>,
  pub page_sql:   String,
  pub page_args:  Vec<Value>,
}

pub fn build_list_query(query: &ContactQuery) -> ListQuery {
  let mut predicate = String::from("1=1");
  let mut args: Vec<Value> = Vec::new();

  if let Some(search) = query.search.as_deref() {
    predicate.push_str(" AND (first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)");
    let pattern = format!("%{search}%");
    args.push(Value::from(pattern.clone()));
    args.push(Value::from(pattern.clone()));
    args.push(Value::from(pattern));
  }

  if let Some(tag) = query.tag.as_deref() {
    predicate.push_str(
      " AND EXISTS (SELECT 1 FROM json_each(contacts.tags) WHERE json_each.value = ?)",
    );
    args.push(Value::from(tag.to_owned()));
  }

  let count_sql = format!("SELECT COUNT(*) FROM contacts WHERE {predicate}");
  let page_sql = format!(
    "SELECT {CONTACT_COLUMNS} FROM contacts WHERE {predicate} \
     ORDER BY created_at DESC LIMIT ? OFFSET ?"
  );

  // limit 0 selects no rows; page 0 saturates to offset 0.
  let limit = i64::from(query.limit);
  let offset = i64::from(query.page.saturating_sub(1)) * limit;

  let count_args = args.clone();
  let mut page_args = args;
  page_args.push(Value::Integer(limit));
  page_args.push(Value::Integer(offset));

  ListQuery { count_sql, count_args, page_sql, page_args }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
