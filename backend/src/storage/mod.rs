//! # Storage Module
//!
//! The record store: a SQLite pool through SQLx, the schema for the active
//! [`SchemaVariant`], and the SQL for reading and writing contacts and their
//! children.
//!
//! Repository functions take an explicit connection. The domain layer opens a
//! transaction per operation and passes it down, so a group of statements
//! either commits together or not at all.

pub mod connection;
pub mod repositories;

pub use connection::{DbConnection, SchemaVariant, DEFAULT_DATABASE_URL};
pub use repositories::ContactRepository;
