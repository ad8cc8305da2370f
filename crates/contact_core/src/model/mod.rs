//! Domain model for the contacts core.
//!
//! # Responsibility
//! - Define the canonical contact record and its input payloads.
//! - Own every field-level constraint checked before persistence.
//!
//! # Invariants
//! - Every persisted contact satisfies `validate()` at creation and after
//!   every update.
//! - `ContactId` values are store-assigned and never reassigned to a live
//!   row.

pub mod contact;
