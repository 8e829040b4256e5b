//! # IO Module
//!
//! The transport layer: axum handlers that translate HTTP requests into
//! `ContactService` calls and map results back to JSON, redirects, or plain
//! text errors.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: the JSON REST interface under `/api`
//! - **Form Endpoints**: form posts from the browser pages, answered with redirects
//! - **Data Serialization**: converting between `shared` DTOs and domain types
//! - **Error Translation**: choosing a status code per error kind

pub mod rest;

pub use rest::*;
