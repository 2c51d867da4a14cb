use axum::{http::StatusCode, response::{IntoResponse, Json}, routing::get, Router};
use log::info;

use crate::domain::catalog;
use crate::AppState;
use shared::{ServiceListResponse, TIME_SLOTS};

/// Create a router for service catalog APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/slots", get(list_time_slots))
}

/// List the salon's service catalog
async fn list_services() -> impl IntoResponse {
    info!("GET /api/services");

    let response = ServiceListResponse {
        services: catalog::all_services().to_vec(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// List the fixed daily time slots
async fn list_time_slots() -> impl IntoResponse {
    info!("GET /api/services/slots");

    (StatusCode::OK, Json(TIME_SLOTS)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, test_state};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_services() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/services")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let catalog: ServiceListResponse = serde_json::from_slice(&body)?;

        assert!(!catalog.services.is_empty());
        assert!(catalog.services.iter().any(|s| s.name == "Gel Manicure"));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_time_slots() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/services/slots")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let slots: Vec<String> = serde_json::from_slice(&body)?;

        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0], "9:00 AM");
        assert_eq!(slots[9], "6:00 PM");

        Ok(())
    }
}
