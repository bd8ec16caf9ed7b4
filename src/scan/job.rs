use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Handle to the one background scan job occupying the slot.
pub struct ScanJob {
    pub run_name: String,
    pub started_at: DateTime<Utc>,
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl ScanJob {
    pub fn new(
        run_name: String,
        handle: JoinHandle<()>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            run_name,
            started_at: Utc::now(),
            handle,
            cancel_token,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal cooperative cancellation and wait for the job to unwind.
    pub async fn cancel_and_join(self) {
        self.cancel_token.cancel();
        if let Err(e) = self.handle.await {
            if !e.is_cancelled() {
                warn!(run = %self.run_name, error = %e, "Scan task join error");
            }
        }
    }
}
