use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{error, info};

use crate::AppState;
use shared::AppointmentRequest;

/// Create a router for appointment booking APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_appointment))
}

/// Create an appointment; the wizard's submit boundary
async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<AppointmentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/appointments - service: {}, start: {}",
        request.service, request.start_time
    );

    match state.appointment_service.create_appointment(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create appointment: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
