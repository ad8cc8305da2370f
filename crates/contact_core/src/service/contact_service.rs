//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoResult};

/// Use-case service wrapper for contact CRUD operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists contacts in insertion order, bounded by limit/offset.
    pub fn list_contacts(&self, limit: u32, offset: u32) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts(limit, offset)
    }

    /// Gets one contact by id; absence is `Ok(None)`.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Creates a contact and returns the stored record, id assigned.
    pub fn create_contact(&self, new: &NewContact) -> RepoResult<Contact> {
        self.repo.create_contact(new)
    }

    /// Applies a partial update by id.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        self.repo.update_contact(id, patch)
    }

    /// Deletes a contact by id; repeated deletion yields `Ok(None)`.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.delete_contact(id)
    }
}
