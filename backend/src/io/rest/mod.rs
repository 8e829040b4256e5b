//! # REST API Interface Layer
//!
//! HTTP endpoints for the address book. Handlers log the request, call the
//! `ContactService`, and translate the outcome:
//!
//! - validation failures → 400 Bad Request
//! - unknown ids → 404 Not Found
//! - storage faults → 500 Internal Server Error
//!
//! Error bodies are the plain-text error message.

pub mod contact_apis;
pub mod form_apis;
pub mod mappers;

pub use contact_apis::*;
pub use form_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::ContactError;

/// Status code for each error kind
pub fn status_for(err: &ContactError) -> StatusCode {
    match err {
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        ContactError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: ContactError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Contact operation failed: {:?}", err);
    } else {
        warn!("Contact request rejected: {}", err);
    }
    (status, err.to_string()).into_response()
}
