use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{error, info};

use crate::AppState;
use shared::ContactRequest;

/// Create a router for the public contact form API
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact_message))
}

/// Accept a contact form submission
async fn submit_contact_message(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> impl IntoResponse {
    info!("POST /api/contact - from: {}", request.email);

    match state.contact_service.submit_message(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to submit contact message: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
