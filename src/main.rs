use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use baseball_schedule_api::config::Config;
use baseball_schedule_api::handler::{self, AppState};
use baseball_schedule_api::statsapi::StatsApi;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let config = Config::from_env().expect("invalid configuration");

    let state = Arc::new(AppState {
        statsapi: StatsApi::new(config.stats_api_base_url.clone()),
        display_tz: config.display_tz,
    });

    let app = Router::new()
        .route("/api/getTeams", get(handler::get_teams))
        .route("/api/getSchedule", get(handler::get_schedule))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind server address");
    info!(addr = %config.bind_addr, display_tz = %config.display_tz, "Listening");
    axum::serve(listener, app).await.expect("server error");
}
