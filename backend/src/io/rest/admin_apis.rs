use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::AppState;
use shared::AdminLoginRequest;

/// Header carrying the admin session token on dashboard requests
const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Create a router for the admin dashboard API
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .route("/appointments", get(list_appointments))
        .route("/appointments/:id/reminder", post(send_reminder))
        .route("/messages", get(list_messages))
}

/// Query parameters for listing contact messages
#[derive(Debug, Deserialize)]
struct MessageListQuery {
    limit: Option<u32>,
}

/// Validate an admin passcode and mint a session token
async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/admin/login");
    let response = state.admin_auth.login(request);
    (StatusCode::OK, Json(response)).into_response()
}

/// Reject requests that do not carry a valid session token
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if token.is_empty() || !state.admin_auth.verify_token(token) {
        warn!("Rejected admin request with missing or invalid token");
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

/// List all stored appointments for the dashboard
async fn list_appointments(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /api/admin/appointments");

    if let Err(status) = authorize(&state, &headers) {
        return status.into_response();
    }

    match state.appointment_service.list_appointments().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list appointments: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Trigger an SMS reminder for a stored appointment
async fn send_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(appointment_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/admin/appointments/{}/reminder", appointment_id);

    if let Err(status) = authorize(&state, &headers) {
        return status.into_response();
    }

    match state.appointment_service.send_reminder(&appointment_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to send reminder for {}: {}", appointment_id, e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

/// List stored contact messages, newest first
async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageListQuery>,
) -> impl IntoResponse {
    info!("GET /api/admin/messages (limit: {:?})", query.limit);

    if let Err(status) = authorize(&state, &headers) {
        return status.into_response();
    }

    match state.contact_service.list_messages(query.limit).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list contact messages: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
