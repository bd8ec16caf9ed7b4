use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::config::Settings;
use crate::errors::VigilError;

pub async fn get_config(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.get().await)
}

/// The one operation where a fault propagates to the caller: a failed
/// settings write surfaces as an error response.
pub async fn update_config(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Value>, VigilError> {
    state.settings.save(settings).await?;
    Ok(Json(json!({"status": "updated"})))
}
