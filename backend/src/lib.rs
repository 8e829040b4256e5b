//! # Address Book Backend
//!
//! Stores contacts (and, optionally, their hobbies and pets) in SQLite and
//! exposes them over a JSON REST interface and HTML form posts.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST + form handlers, DTO mappers)
//!     ↓
//! Domain Layer (validation, ContactService, fixtures)
//!     ↓
//! Storage Layer (SQLite pool, schema, repository SQL)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ContactService;
use crate::storage::DbConnection;

/// Main application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
}

impl AppState {
    pub fn new(contact_service: ContactService) -> Self {
        Self { contact_service }
    }
}

/// Open the database and build the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::new(&config.database_url, config.schema).await?;

    info!("Setting up domain model");
    let contact_service = ContactService::new(db_conn);

    Ok(AppState::new(contact_service))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid cors_origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/all", get(io::list_contacts))
        .route("/all/", get(io::list_contacts))
        .route(
            "/contact",
            post(io::create_contact).put(io::update_contact_from_body),
        )
        .route("/contact/initialize", post(io::initialize_contacts))
        .route(
            "/contact/:id",
            get(io::get_contact)
                .put(io::update_contact)
                .delete(io::delete_contact),
        );

    let form_routes = Router::new()
        .route("/contact", post(io::create_contact_form))
        .route("/update/:id", post(io::update_contact_form))
        .route("/delete/:id", get(io::delete_contact_form));

    let mut app = Router::new().nest("/api", api_routes).merge(form_routes);
    if let Some(static_dir) = &config.static_dir {
        info!("Serving pages from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    Ok(app.layer(cors).with_state(app_state))
}
