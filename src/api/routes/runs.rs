use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::AppState;
use crate::models::{RunSummary, ScanStatus};

pub async fn list_runs(State(state): State<AppState>) -> Json<Vec<RunSummary>> {
    Json(state.history.list_runs().await)
}

/// Unknown runs yield the empty snapshot rather than a 404, matching the
/// original control-surface contract.
pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Json<ScanStatus> {
    match state.history.get_run_details(&run_id).await {
        Some(details) => Json(details),
        None => Json(ScanStatus::empty()),
    }
}
