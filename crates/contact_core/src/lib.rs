//! Core data-access logic for the contacts CRM backend.
//! This crate is the single source of truth for contact invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    Contact, ContactId, ContactPatch, ContactValidationError, CrmStatus, NewContact,
};
pub use repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
pub use search::{
    search_contacts, search_contacts_by_field, upcoming_birthdays, BirthdayWindow, SearchError,
    SearchField, SearchResult, MAX_FORWARD_SHIFT_DAYS,
};
pub use service::contact_service::ContactService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
