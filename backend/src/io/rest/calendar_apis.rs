use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::AppState;

/// Query parameters for the calendar month API
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: u32,
    pub year: i32,
    /// Currently selected booking date, ISO format (YYYY-MM-DD)
    pub selected: Option<String>,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/current-date", get(get_current_date))
}

/// Get the 42-cell booking grid for a month
async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/month - query: {:?}", query);

    if !(1..=12).contains(&query.month) {
        return (StatusCode::BAD_REQUEST, "Invalid month").into_response();
    }

    let selected = match query.selected.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => return (StatusCode::BAD_REQUEST, "Invalid selected date").into_response(),
        },
        None => None,
    };

    // The grid itself is pure; the ambient clock is read once here
    let today = state.calendar_service.today();
    let grid = state
        .calendar_service
        .month_grid(query.month, query.year, today, selected);
    (StatusCode::OK, Json(grid)).into_response()
}

/// Get current date information from the backend
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.get_current_date();
    (StatusCode::OK, Json(current_date)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, test_state};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_get_calendar_month() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/month?month=4&year=2024")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let grid: shared::CalendarMonth = serde_json::from_slice(&body)?;

        // April 2024: 42 cells, 1 leading filler, 30 in-month, 11 trailing
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.first_day_of_week, 1);
        assert_eq!(grid.cells.iter().filter(|c| c.in_current_month).count(), 30);
        assert!(!grid.cells[0].in_current_month);
        assert!(!grid.cells[41].in_current_month);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_calendar_month_with_selection() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/month?month=2&year=2024&selected=2024-02-10")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let grid: shared::CalendarMonth = serde_json::from_slice(&body)?;

        // Leap-year February: 29 in-month cells, 4 leading fillers
        assert_eq!(grid.cells.iter().filter(|c| c.in_current_month).count(), 29);
        assert_eq!(
            grid.cells.iter().take_while(|c| !c.in_current_month).count(),
            4
        );

        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].day, 10);
        assert!(selected[0].in_current_month);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_month_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/month?month=13&year=2024")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_current_date() -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/current-date")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let current: shared::CurrentDateResponse = serde_json::from_slice(&body)?;

        assert!((1..=12).contains(&current.month));
        assert!((1..=31).contains(&current.day));
        assert!(current.iso_date.contains('-'));

        Ok(())
    }
}
