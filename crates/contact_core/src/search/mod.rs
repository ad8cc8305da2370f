//! Contact search queries.
//!
//! # Responsibility
//! - Free-text substring search across name and email columns.
//! - Field-dispatch search restricted to a closed set of columns.
//! - Rolling birthday-window query with year wraparound.
//!
//! # Invariants
//! - Zero matches is a successful empty result, never an error.
//! - User-supplied text is escaped before it reaches a `LIKE` pattern.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod birthday;
pub mod text;

pub use birthday::{upcoming_birthdays, BirthdayWindow, MAX_FORWARD_SHIFT_DAYS};
pub use text::{search_contacts, search_contacts_by_field, SearchField};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for input validation, DB interaction and row decoding.
#[derive(Debug)]
pub enum SearchError {
    /// Field name outside the enumerated searchable set.
    UnknownField { name: String },
    /// Birthday window shift above [`MAX_FORWARD_SHIFT_DAYS`].
    ShiftOutOfRange { requested: u16 },
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { name } => {
                write!(f, "unknown searchable field `{name}`")
            }
            Self::ShiftOutOfRange { requested } => write!(
                f,
                "forward shift {requested} exceeds maximum {MAX_FORWARD_SHIFT_DAYS} days"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownField { .. } => None,
            Self::ShiftOutOfRange { .. } => None,
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<crate::repo::contact_repo::RepoError> for SearchError {
    fn from(value: crate::repo::contact_repo::RepoError) -> Self {
        use crate::repo::contact_repo::RepoError;
        match value {
            RepoError::Db(err) => Self::Db(err),
            RepoError::Validation(err) => Self::InvalidData(err.to_string()),
            RepoError::InvalidData(message) => Self::InvalidData(message),
            RepoError::NotFound(id) => Self::InvalidData(format!("contact {id} vanished mid-query")),
        }
    }
}
