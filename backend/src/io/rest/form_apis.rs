//! # Form Endpoints
//!
//! Targets for the HTML forms served from the static directory. Success
//! redirects back to the index page; failure answers with a plain-text error.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use shared::ContactForm;
use tracing::info;

use super::error_response;
use super::mappers::ContactMapper;
use crate::AppState;

const INDEX_PATH: &str = "/";

pub async fn create_contact_form(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Response {
    info!("POST /contact - form: {:?}", form);

    let fields = ContactMapper::form_to_command(form);
    match state.contact_service.create(fields, None).await {
        Ok(_) => Redirect::to(INDEX_PATH).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_contact_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ContactForm>,
) -> Response {
    info!("POST /update/{} - form: {:?}", id, form);

    let fields = ContactMapper::form_to_command(form);
    match state.contact_service.update(id, fields).await {
        Ok(_) => Redirect::to(INDEX_PATH).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_contact_form(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    info!("GET /delete/{}", id);

    match state.contact_service.delete(id).await {
        Ok(()) => Redirect::to(INDEX_PATH).into_response(),
        Err(e) => error_response(e),
    }
}
