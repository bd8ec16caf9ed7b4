use serde::Serialize;

/// Wire shape of a successful or rejected start request.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartResponse {
    Started { run_name: String },
    Error { message: String },
}

/// Wire shape of a stop request outcome.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StopResponse {
    Stopped,
    NoScanRunning,
}
