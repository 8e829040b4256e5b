//! # Domain Module
//!
//! Business rules for the address book, independent of HTTP and of SQL.
//!
//! ## Module Organization
//!
//! - **validation**: pure checks and normalization of incoming field data
//! - **contact_service**: the persistence contract (create, read, update,
//!   delete, re-seed), one transaction per call
//! - **fixtures**: the deterministic data written by a re-seed
//! - **commands**: raw input handed over by the IO layer
//! - **models**: plain entity types
//! - **error**: the typed error taxonomy shared by every operation
//!
//! ## Business Rules
//!
//! - First and last name are required; state, zip and phone have length caps
//! - A blank birthday means "no birthday"; anything else must be an ISO date
//! - Listing is always ordered by last name, then first name
//! - Hobbies and pets belong to exactly one contact and die with it

pub mod commands;
pub mod contact_service;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod validation;

pub use commands::*;
pub use contact_service::ContactService;
pub use error::ContactError;
