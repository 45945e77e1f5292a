use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod config;
mod domain;
mod rest;
mod storage;

use crate::config::Config;
use crate::domain::daily::{schedule_daily_refresh, DailyPicker};
use crate::domain::prayer_service::PrayerService;
use crate::rest::AppState;
use crate::storage::sqlite::SqlitePrayerStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Config::from_env()?;
    info!("Loaded config: {:?}", config);

    info!("Setting up prayer store");
    let store = SqlitePrayerStore::new(&config.database_url).await?;

    let service = PrayerService::new(
        Arc::new(store),
        config.access_policy.clone(),
        config.min_word_count,
        config.daily_pool_limit,
    );
    let daily = Arc::new(DailyPicker::new(config.daily_seed_offset_days));
    let state = AppState::new(service, daily.clone());

    // Re-pick at local midnight and every 24h after; the handle aborts the
    // timer task when it goes out of scope at shutdown
    let refresh_daily = daily.clone();
    let _refresh_handle = schedule_daily_refresh(move || refresh_daily.refresh());

    // CORS setup to allow the browser frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/prayers", post(rest::submit_prayer))
        .route("/prayers/count", get(rest::prayer_count))
        .route("/prayers/:code", get(rest::get_prayer))
        .route("/daily", get(rest::daily_prayer));

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
