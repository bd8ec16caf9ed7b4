pub mod errors;
pub mod models;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::ScanAgent;
use crate::config::SettingsStore;
use crate::errors::VigilError;
use crate::history::RunHistory;
use crate::scan::ScanManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ScanManager>,
    pub history: Arc<RunHistory>,
    pub settings: Arc<SettingsStore>,
}

pub async fn create_app_state(
    runs_dir: PathBuf,
    config_path: PathBuf,
    agent: Arc<dyn ScanAgent>,
) -> Result<AppState, VigilError> {
    tokio::fs::create_dir_all(&runs_dir).await?;
    Ok(AppState {
        manager: Arc::new(ScanManager::new(agent, runs_dir.clone())),
        history: Arc::new(RunHistory::new(runs_dir)),
        settings: Arc::new(SettingsStore::load(config_path).await),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/scan", axum::routing::post(routes::scans::start_scan))
        .route("/api/stop", axum::routing::post(routes::scans::stop_scan))
        .route("/api/status", axum::routing::get(routes::status::get_status))
        .route("/api/runs", axum::routing::get(routes::runs::list_runs))
        .route("/api/runs/{run_id}", axum::routing::get(routes::runs::get_run))
        .route(
            "/api/config",
            axum::routing::get(routes::settings::get_config).post(routes::settings::update_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
