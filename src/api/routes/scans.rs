use axum::{extract::State, Json};

use crate::api::models::{StartResponse, StopResponse};
use crate::api::AppState;
use crate::models::ScanRequest;
use crate::scan::{StartOutcome, StopOutcome};

/// Schedule a scan. Returns immediately; callers poll `/api/status` for the
/// job's progress. A double start gets a structured rejection, not an error
/// status code.
pub async fn start_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Json<StartResponse> {
    match state.manager.start(request).await {
        StartOutcome::Started { run_name } => Json(StartResponse::Started { run_name }),
        StartOutcome::AlreadyRunning => Json(StartResponse::Error {
            message: "Scan already running".to_string(),
        }),
    }
}

pub async fn stop_scan(State(state): State<AppState>) -> Json<StopResponse> {
    match state.manager.stop().await {
        StopOutcome::Stopped => Json(StopResponse::Stopped),
        StopOutcome::NoScanRunning => Json(StopResponse::NoScanRunning),
    }
}
