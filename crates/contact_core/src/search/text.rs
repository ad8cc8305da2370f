//! Substring search over contact columns.
//!
//! # Responsibility
//! - Free-text OR-search across `first_name`, `last_name` and `email`.
//! - Single-column search dispatched through a closed field enum.
//!
//! # Invariants
//! - `%`, `_` and `\` in user input match literally (`ESCAPE '\'`).
//! - Field dispatch never reaches SQL with an unrecognized column name.

use crate::model::contact::Contact;
use crate::repo::contact_repo::{contact_from_row, CONTACT_SELECT_SQL};
use crate::search::{SearchError, SearchResult};
use rusqlite::Connection;

/// Closed set of columns addressable by field-dispatch search.
///
/// Replaces the runtime attribute lookup of dynamic dispatch: an unknown
/// name fails at the boundary with [`SearchError::UnknownField`] instead
/// of faulting inside the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
}

impl SearchField {
    /// Parses a caller-supplied field name.
    pub fn from_name(name: &str) -> SearchResult<Self> {
        match name {
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "phone_number" => Ok(Self::PhoneNumber),
            other => Err(SearchError::UnknownField {
                name: other.to_string(),
            }),
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
        }
    }
}

/// Returns contacts whose first name, last name or email contains `query`
/// as a substring, in insertion order.
///
/// Matching is case-insensitive with SQLite `LIKE` semantics (ASCII case
/// folding only). An empty query matches every record.
pub fn search_contacts(conn: &Connection, query: &str) -> SearchResult<Vec<Contact>> {
    let pattern = like_pattern(query);
    let sql = format!(
        "{CONTACT_SELECT_SQL}
         WHERE first_name LIKE ?1 ESCAPE '\\'
            OR last_name LIKE ?1 ESCAPE '\\'
            OR email LIKE ?1 ESCAPE '\\'
         ORDER BY id ASC;"
    );

    collect_contacts(conn, &sql, &pattern)
}

/// Returns contacts where exactly one column contains `value` as a
/// substring, with the same semantics as [`search_contacts`].
pub fn search_contacts_by_field(
    conn: &Connection,
    field: SearchField,
    value: &str,
) -> SearchResult<Vec<Contact>> {
    let pattern = like_pattern(value);
    let sql = format!(
        "{CONTACT_SELECT_SQL}
         WHERE {} LIKE ?1 ESCAPE '\\'
         ORDER BY id ASC;",
        field.column()
    );

    collect_contacts(conn, &sql, &pattern)
}

fn collect_contacts(conn: &Connection, sql: &str, pattern: &str) -> SearchResult<Vec<Contact>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([pattern])?;
    let mut contacts = Vec::new();

    while let Some(row) = rows.next()? {
        contacts.push(contact_from_row(row)?);
    }

    Ok(contacts)
}

fn like_pattern(query: &str) -> String {
    format!("%{}%", escape_like_metacharacters(query))
}

fn escape_like_metacharacters(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
