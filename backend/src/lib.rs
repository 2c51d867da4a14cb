//! # Salon Backend
//!
//! Contains all non-UI logic for the nail salon booking application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Booking rules (calendar grid, wizard, appointments, notifications)
//! - **Storage**: Data persistence (SQLite appointments and contact messages)
//! - **IO**: Interface layer that exposes functionality over REST
//!
//! The backend is designed to be UI-agnostic: the booking wizard and
//! calendar grid are plain domain types that any frontend can drive
//! through the REST API without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (web frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Booking logic, services)
//!     ↓
//! Storage Layer (Database, persistence)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::domain::notifications::{email_notifier_from_config, sms_notifier_from_config};
use crate::domain::{AdminAuthService, AppointmentService, CalendarService, ContactService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
    pub appointment_service: AppointmentService,
    pub contact_service: ContactService,
    pub admin_auth: AdminAuthService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = Arc::new(DbConnection::new(&config.database_url).await?);

    info!("Setting up notification channels");
    let email = email_notifier_from_config(&config.email)?;
    let sms = sms_notifier_from_config(&config.sms);

    info!("Setting up domain model");
    let calendar_service = CalendarService::new();
    let appointment_service =
        AppointmentService::new(Arc::clone(&db), Arc::clone(&email), Arc::clone(&sms));
    let contact_service = ContactService::new(db, email, config.email.notify_email.clone());
    let admin_auth = AdminAuthService::new(config.admin_passcode.clone());

    info!("Setting up application state");
    Ok(AppState {
        calendar_service,
        appointment_service,
        contact_service,
        admin_auth,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .nest("/calendar", io::rest::calendar_apis::router())
        .nest("/services", io::rest::service_apis::router())
        .nest("/appointments", io::rest::appointment_apis::router())
        .nest("/contact", io::rest::contact_apis::router())
        .nest("/admin", io::rest::admin_apis::router());

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

/// Build an AppState backed by an in-memory database and dry-run
/// notifiers, suitable for exercising the REST API in tests.
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    use crate::domain::notifications::{DryRunEmailNotifier, DryRunSmsNotifier};

    let db = Arc::new(
        DbConnection::init_test()
            .await
            .expect("Failed to create test database"),
    );
    let email: Arc<dyn crate::domain::notifications::EmailNotifier> = Arc::new(DryRunEmailNotifier);
    let sms: Arc<dyn crate::domain::notifications::SmsNotifier> = Arc::new(DryRunSmsNotifier);

    AppState {
        calendar_service: CalendarService::new(),
        appointment_service: AppointmentService::new(
            Arc::clone(&db),
            Arc::clone(&email),
            Arc::clone(&sms),
        ),
        contact_service: ContactService::new(db, email, String::new()),
        admin_auth: AdminAuthService::new("peony".to_string()),
    }
}
