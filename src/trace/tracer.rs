use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::VigilError;
use crate::models::{AgentInfo, ChatMessage, ScanStatus, UsageStats, VulnerabilityRecord};
use super::artifacts;

/// Maximum number of chat messages included in a status snapshot.
pub const MAX_STATUS_LOGS: usize = 50;

/// Live mutable record of one scan's progress.
///
/// Owned by exactly one scan job for its lifetime. All fields live behind a
/// single `RwLock` so a status snapshot never observes a partially applied
/// update. Released exactly once; release persists the run's artifact layout
/// (finding index plus one document per finding) under the run directory.
pub struct Tracer {
    run_name: String,
    run_dir: PathBuf,
    released: AtomicBool,
    inner: RwLock<TraceInner>,
}

#[derive(Default)]
struct TraceInner {
    messages: Vec<ChatMessage>,
    vulnerabilities: Vec<VulnerabilityRecord>,
    agents: HashMap<String, AgentInfo>,
    usage: UsageStats,
}

impl Tracer {
    pub fn new(run_name: &str, run_dir: PathBuf) -> Self {
        Self {
            run_name: run_name.to_string(),
            run_dir,
            released: AtomicBool::new(false),
            inner: RwLock::new(TraceInner::default()),
        }
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub async fn record_message(&self, role: &str, content: &str) {
        let mut inner = self.inner.write().await;
        inner.messages.push(ChatMessage::new(role, content));
    }

    pub async fn record_vulnerability(&self, record: VulnerabilityRecord) {
        info!(run = %self.run_name, id = %record.id, severity = %record.severity, "Recorded finding");
        let mut inner = self.inner.write().await;
        inner.vulnerabilities.push(record);
    }

    pub async fn register_agent(&self, agent: AgentInfo) {
        let mut inner = self.inner.write().await;
        inner.agents.insert(agent.id.clone(), agent);
    }

    pub async fn set_agent_status(&self, agent_id: &str, status: &str) {
        let mut inner = self.inner.write().await;
        if let Some(agent) = inner.agents.get_mut(agent_id) {
            agent.status = status.to_string();
        }
    }

    pub async fn record_usage(&self, delta: &UsageStats) {
        let mut inner = self.inner.write().await;
        inner.usage.add(delta);
    }

    /// Aggregate usage recorded so far, or `None` when nothing was recorded.
    pub async fn total_stats(&self) -> Option<UsageStats> {
        let inner = self.inner.read().await;
        if inner.usage.is_empty() {
            None
        } else {
            Some(inner.usage.clone())
        }
    }

    /// Build a point-in-time snapshot. Logs are capped to the most recent
    /// [`MAX_STATUS_LOGS`] messages in their original order.
    pub async fn snapshot(&self, is_running: bool) -> ScanStatus {
        let inner = self.inner.read().await;
        let skip = inner.messages.len().saturating_sub(MAX_STATUS_LOGS);
        ScanStatus {
            is_running,
            logs: inner.messages[skip..].to_vec(),
            vulnerabilities: inner.vulnerabilities.clone(),
            agents: inner.agents.clone(),
            stats: if inner.usage.is_empty() {
                None
            } else {
                Some(inner.usage.clone())
            },
        }
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    /// Release the trace, persisting the run's artifacts. Idempotent: only
    /// the first call performs the write.
    pub async fn release(&self) -> Result<(), VigilError> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let vulnerabilities = {
            let inner = self.inner.read().await;
            inner.vulnerabilities.clone()
        };

        artifacts::persist_run(&self.run_dir, &vulnerabilities).await?;
        info!(run = %self.run_name, findings = vulnerabilities.len(), "Trace released");
        Ok(())
    }
}
