//! Axum handlers for the prayer API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    DailyPrayer, DailyPrayerResponse, PrayerCountResponse, PrayerResponse, SubmitPrayerRequest,
    SubmitPrayerResponse,
};
use std::sync::Arc;
use tracing::info;

use crate::domain::daily::DailyPicker;
use crate::domain::prayer_service::{PrayerError, PrayerService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PrayerService,
    pub daily: Arc<DailyPicker>,
}

impl AppState {
    pub fn new(service: PrayerService, daily: Arc<DailyPicker>) -> Self {
        Self { service, daily }
    }
}

fn error_response(error: &PrayerError) -> Response {
    let status = match error {
        PrayerError::InvalidFormat | PrayerError::TooFewWords { .. } => StatusCode::BAD_REQUEST,
        PrayerError::NotFound => StatusCode::NOT_FOUND,
        PrayerError::NotYetAvailable { .. } => StatusCode::FORBIDDEN,
        PrayerError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, error.to_string()).into_response()
}

/// POST /api/prayers
pub async fn submit_prayer(
    State(state): State<AppState>,
    Json(request): Json<SubmitPrayerRequest>,
) -> Response {
    info!("POST /api/prayers");

    match state.service.submit(&request.text, request.color).await {
        Ok(code) => (StatusCode::CREATED, Json(SubmitPrayerResponse { code })).into_response(),
        Err(e) => {
            tracing::error!("Error submitting prayer: {:?}", e);
            error_response(&e)
        }
    }
}

/// GET /api/prayers/:code
pub async fn get_prayer(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    info!("GET /api/prayers/{}", code);

    match state.service.retrieve(&code).await {
        Ok(record) => (
            StatusCode::OK,
            Json(PrayerResponse {
                text: record.text,
                color: record.color,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/prayers/count
pub async fn prayer_count(State(state): State<AppState>) -> Response {
    info!("GET /api/prayers/count");

    match state.service.count().await {
        Ok(count) => (StatusCode::OK, Json(PrayerCountResponse { count })).into_response(),
        Err(e) => {
            tracing::error!("Error counting prayers: {:?}", e);
            error_response(&e)
        }
    }
}

/// GET /api/daily
///
/// Lazily fetches the pool on the first request, then serves the current
/// pick; the midnight refresh task re-picks from the same pool.
pub async fn daily_prayer(State(state): State<AppState>) -> Response {
    info!("GET /api/daily");

    if !state.daily.is_loaded() {
        match state.service.daily_pool().await {
            Ok(pool) => state.daily.load_pool(pool),
            Err(e) => {
                tracing::error!("Error loading daily pool: {:?}", e);
                return error_response(&e);
            }
        }
    }

    match state.service.count().await {
        Ok(count) => {
            let prayer = state.daily.selected().map(|entry| DailyPrayer {
                text: entry.text,
                color: entry.color,
            });
            (StatusCode::OK, Json(DailyPrayerResponse { count, prayer })).into_response()
        }
        Err(e) => {
            tracing::error!("Error counting prayers: {:?}", e);
            error_response(&e)
        }
    }
}
