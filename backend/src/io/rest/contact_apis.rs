//! # REST API for Contact Management
//!
//! JSON endpoints for listing, reading, creating, updating, deleting and
//! re-seeding contacts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ContactRequest;
use tracing::info;

use super::error_response;
use super::mappers::ContactMapper;
use crate::domain::ContactError;
use crate::AppState;

/// List all contacts sorted by name
pub async fn list_contacts(State(state): State<AppState>) -> Response {
    info!("GET /api/all");

    match state.contact_service.list_all().await {
        Ok(contacts) => (StatusCode::OK, Json(ContactMapper::to_dto_list(contacts))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Get a contact by ID
pub async fn get_contact(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    info!("GET /api/contact/{}", id);

    match state.contact_service.get_by_id(id).await {
        Ok(contact) => (StatusCode::OK, Json(ContactMapper::to_dto(contact))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a contact, with optional inline hobbies and pets
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Response {
    info!("POST /api/contact - request: {:?}", request);

    let (fields, children) = ContactMapper::request_to_command(request);
    match state.contact_service.create(fields, children).await {
        Ok(contact) => (StatusCode::OK, Json(ContactMapper::to_dto(contact))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Update the contact whose id is carried in the request body
pub async fn update_contact_from_body(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Response {
    info!("PUT /api/contact - request: {:?}", request);

    match request.id {
        Some(id) => update(&state, id, request).await,
        None => error_response(ContactError::missing("id")),
    }
}

/// Update the contact addressed by the path
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ContactRequest>,
) -> Response {
    info!("PUT /api/contact/{} - request: {:?}", id, request);

    update(&state, id, request).await
}

async fn update(state: &AppState, id: i64, request: ContactRequest) -> Response {
    // Child collections are not changed by an update
    let (fields, _) = ContactMapper::request_to_command(request);
    match state.contact_service.update(id, fields).await {
        Ok(contact) => (StatusCode::OK, Json(ContactMapper::to_dto(contact))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete a contact and its children
pub async fn delete_contact(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    info!("DELETE /api/contact/{}", id);

    match state.contact_service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Wipe the store and load the fixture contacts
pub async fn initialize_contacts(State(state): State<AppState>) -> Response {
    info!("POST /api/contact/initialize");

    match state.contact_service.reinitialize().await {
        Ok(contacts) => (StatusCode::OK, Json(ContactMapper::to_dto_list(contacts))).into_response(),
        Err(e) => error_response(e),
    }
}
