use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::agents::ProbeAgent;
use crate::api;
use crate::errors::VigilError;
use super::commands::ServeArgs;

pub async fn handle_serve(args: ServeArgs) -> Result<(), VigilError> {
    info!(host = %args.host, port = args.port, "Starting control-surface server");

    let agent = Arc::new(ProbeAgent::new()?);
    let state = api::create_app_state(
        PathBuf::from(&args.runs_dir),
        PathBuf::from(&args.config),
        agent,
    )
    .await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| VigilError::Internal(format!("Server error: {e}")))?;

    Ok(())
}
