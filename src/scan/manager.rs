use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::agents::ScanAgent;
use crate::models::{ScanConfig, ScanRequest, ScanStatus};
use crate::trace::Tracer;
use super::job::ScanJob;

/// Result of a start request. `AlreadyRunning` is an expected outcome, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started { run_name: String },
    AlreadyRunning,
}

/// Result of a stop request. Stopping with nothing running is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NoScanRunning,
}

/// Owns the single active-job slot and the current live trace.
///
/// The slot mutex is held across the occupied check and the insert, so
/// concurrent start calls can never both succeed. The spawned job releases
/// its tracer on every exit path: completion, agent failure, cancellation.
pub struct ScanManager {
    agent: Arc<dyn ScanAgent>,
    runs_dir: PathBuf,
    slot: Mutex<Option<ScanJob>>,
    current_trace: RwLock<Option<Arc<Tracer>>>,
}

impl ScanManager {
    pub fn new(agent: Arc<dyn ScanAgent>, runs_dir: PathBuf) -> Self {
        Self {
            agent,
            runs_dir,
            slot: Mutex::new(None),
            current_trace: RwLock::new(None),
        }
    }

    /// Schedule a scan in the background and return immediately. Rejects the
    /// request while an unfinished job occupies the slot.
    pub async fn start(&self, request: ScanRequest) -> StartOutcome {
        let mut slot = self.slot.lock().await;
        if let Some(job) = slot.as_ref() {
            if !job.is_finished() {
                info!(active = %job.run_name, "Rejecting start, scan already running");
                return StartOutcome::AlreadyRunning;
            }
        }

        let run_name = request.run_name();
        let config = ScanConfig::from_request(&request, &run_name);
        let tracer = Arc::new(Tracer::new(&run_name, self.runs_dir.join(&run_name)));
        *self.current_trace.write().await = Some(Arc::clone(&tracer));

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(run_job(
            Arc::clone(&self.agent),
            config,
            tracer,
            cancel_token.clone(),
        ));
        *slot = Some(ScanJob::new(run_name.clone(), handle, cancel_token));

        info!(run = %run_name, "Scan scheduled");
        StartOutcome::Started { run_name }
    }

    /// Cancel the active job and wait for it to unwind. Idempotent when
    /// nothing is running.
    pub async fn stop(&self) -> StopOutcome {
        let mut slot = self.slot.lock().await;
        match slot.take() {
            Some(job) if !job.is_finished() => {
                info!(run = %job.run_name, "Stopping scan");
                job.cancel_and_join().await;
                StopOutcome::Stopped
            }
            _ => StopOutcome::NoScanRunning,
        }
    }

    /// Point-in-time snapshot of the current scan, or the empty snapshot
    /// when no trace has ever been published.
    pub async fn status(&self) -> ScanStatus {
        let tracer = match self.current_trace.read().await.clone() {
            Some(tracer) => tracer,
            None => return ScanStatus::empty(),
        };

        let is_running = {
            let slot = self.slot.lock().await;
            slot.as_ref().map(|job| !job.is_finished()).unwrap_or(false)
        };
        tracer.snapshot(is_running).await
    }

    /// The live trace, if one has been published. Stays available after the
    /// job finishes so status keeps showing the last run.
    pub async fn current_trace(&self) -> Option<Arc<Tracer>> {
        self.current_trace.read().await.clone()
    }
}

/// Background job body: race the agent against cancellation, then release
/// the trace unconditionally.
async fn run_job(
    agent: Arc<dyn ScanAgent>,
    config: ScanConfig,
    tracer: Arc<Tracer>,
    cancel_token: CancellationToken,
) {
    tokio::select! {
        _ = cancel_token.cancelled() => {
            info!(run = %config.run_name, "Scan cancelled");
        }
        result = agent.execute_scan(&config, Arc::clone(&tracer)) => match result {
            Ok(()) => info!(run = %config.run_name, "Scan completed"),
            Err(e) => error!(run = %config.run_name, error = %e, "Scan failed"),
        },
    }

    if let Err(e) = tracer.release().await {
        error!(run = %config.run_name, error = %e, "Trace release failed");
    }
}
