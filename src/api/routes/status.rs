use axum::{extract::State, Json};

use crate::api::AppState;
use crate::models::ScanStatus;

pub async fn get_status(State(state): State<AppState>) -> Json<ScanStatus> {
    Json(state.manager.status().await)
}
