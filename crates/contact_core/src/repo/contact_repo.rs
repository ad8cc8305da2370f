//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate payloads before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `create` and `update` re-read the stored row so store-side defaults
//!   are reflected in the returned record.

use crate::db::DbError;
use crate::model::contact::{
    Contact, ContactId, ContactPatch, ContactValidationError, CrmStatus, NewContact,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone_number,
    birth_date,
    crm_status
FROM contacts";

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Lists contacts in insertion (`id`) order, window `[offset, offset+limit)`.
    fn list_contacts(&self, limit: u32, offset: u32) -> RepoResult<Vec<Contact>>;
    /// Gets one contact by id. Absence is `Ok(None)`, not an error.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Persists a new contact and returns the stored row, id assigned.
    fn create_contact(&self, new: &NewContact) -> RepoResult<Contact>;
    /// Applies only the supplied patch fields. `NotFound` when `id` is absent.
    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact>;
    /// Removes the row and returns it; `Ok(None)` when already absent.
    fn delete_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
}

/// SQLite-backed contact repository.
///
/// Borrows a bootstrapped connection for one caller scope; owns no state
/// between calls.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self, limit: u32, offset: u32) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"))?;

        let mut rows = stmt.query(params![i64::from(limit), i64::from(offset)])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }

        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        fetch_contact(self.conn, id)
    }

    fn create_contact(&self, new: &NewContact) -> RepoResult<Contact> {
        new.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                first_name,
                last_name,
                email,
                phone_number,
                birth_date,
                crm_status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                new.first_name.as_str(),
                new.last_name.as_str(),
                new.email.as_str(),
                new.phone_number.as_str(),
                new.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
                new.crm_status.unwrap_or_default().as_db_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        fetch_contact(self.conn, id)?.ok_or(RepoError::NotFound(id))
    }

    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        patch.validate()?;

        if patch.is_empty() {
            return fetch_contact(self.conn, id)?.ok_or(RepoError::NotFound(id));
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(first_name) = &patch.first_name {
            assignments.push("first_name = ?");
            bind_values.push(Value::Text(first_name.clone()));
        }
        if let Some(last_name) = &patch.last_name {
            assignments.push("last_name = ?");
            bind_values.push(Value::Text(last_name.clone()));
        }
        if let Some(email) = &patch.email {
            assignments.push("email = ?");
            bind_values.push(Value::Text(email.clone()));
        }
        if let Some(phone_number) = &patch.phone_number {
            assignments.push("phone_number = ?");
            bind_values.push(Value::Text(phone_number.clone()));
        }
        if let Some(birth_date) = &patch.birth_date {
            assignments.push("birth_date = ?");
            bind_values.push(Value::Text(birth_date.format(BIRTH_DATE_FORMAT).to_string()));
        }
        if let Some(crm_status) = patch.crm_status {
            assignments.push("crm_status = ?");
            bind_values.push(Value::Text(crm_status.as_db_str().to_string()));
        }

        let sql = format!(
            "UPDATE contacts
             SET {}, updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        fetch_contact(self.conn, id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let Some(contact) = fetch_contact(self.conn, id)? else {
            return Ok(None);
        };

        self.conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        Ok(Some(contact))
    }
}

pub(crate) fn fetch_contact(conn: &Connection, id: ContactId) -> RepoResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(contact_from_row(row)?));
    }

    Ok(None)
}

pub(crate) fn contact_from_row(row: &Row<'_>) -> RepoResult<Contact> {
    let birth_date_text: String = row.get("birth_date")?;
    let birth_date = NaiveDate::parse_from_str(&birth_date_text, BIRTH_DATE_FORMAT)
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{birth_date_text}` in contacts.birth_date"
            ))
        })?;

    let status_text: String = row.get("crm_status")?;
    let crm_status = CrmStatus::from_db_str(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in contacts.crm_status"
        ))
    })?;

    let contact = Contact {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
        birth_date,
        crm_status,
    };
    contact.validate()?;
    Ok(contact)
}
