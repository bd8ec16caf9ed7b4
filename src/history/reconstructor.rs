use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{RunSummary, ScanStatus, VulnerabilityRecord};
use crate::trace::artifacts::{FINDINGS_DIR, FINDINGS_INDEX};

/// Rebuilds approximate run status from the on-disk artifact layout.
///
/// The layout carries no richer metadata than the directory mtime and the
/// finding files, so reconstructed runs always report status "completed" and
/// severity "unknown". Unreadable artifacts degrade the affected entry to
/// defaults; they never abort a listing.
pub struct RunHistory {
    runs_dir: PathBuf,
}

impl RunHistory {
    pub fn new(runs_dir: PathBuf) -> Self {
        Self { runs_dir }
    }

    /// All persisted runs, newest first.
    pub async fn list_runs(&self) -> Vec<RunSummary> {
        let mut entries = match tokio::fs::read_dir(&self.runs_dir).await {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut runs = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read runs directory entry");
                    break;
                }
            };

            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let run_id = entry.file_name().to_string_lossy().into_owned();
            runs.push(self.summarize(&entry.path(), run_id).await);
        }

        // Sort on the instants, not their string forms; RFC 3339 rendering
        // varies in fractional precision.
        runs.sort_by(|(a_time, a), (b_time, b)| {
            b_time.cmp(a_time).then_with(|| a.run_id.cmp(&b.run_id))
        });
        runs.into_iter().map(|(_, summary)| summary).collect()
    }

    async fn summarize(&self, run_dir: &Path, run_id: String) -> (DateTime<Utc>, RunSummary) {
        let vuln_count = match read_vuln_count(run_dir).await {
            Ok(count) => count,
            Err(e) => {
                warn!(run = %run_id, error = %e, "Unreadable finding index, degrading count to 0");
                0
            }
        };

        let start_time = match tokio::fs::metadata(run_dir).await.and_then(|m| m.modified()) {
            Ok(mtime) => DateTime::<Utc>::from(mtime),
            Err(e) => {
                warn!(run = %run_id, error = %e, "No mtime available, degrading start time");
                DateTime::<Utc>::UNIX_EPOCH
            }
        };

        let summary = RunSummary {
            run_name: run_id.clone(),
            run_id,
            start_time: start_time.to_rfc3339(),
            status: "completed".to_string(),
            vuln_count,
        };
        (start_time, summary)
    }

    /// Reconstruct a ScanStatus-shaped detail for one run, or `None` when the
    /// run directory does not exist. Logs are never persisted in this layout,
    /// so the detail always has an empty log list and is_running=false.
    pub async fn get_run_details(&self, run_id: &str) -> Option<ScanStatus> {
        // Run ids come straight off the wire; refuse anything that could
        // escape the runs directory.
        if run_id.is_empty() || run_id.contains(['/', '\\']) || run_id.contains("..") {
            return None;
        }

        let run_dir = self.runs_dir.join(run_id);
        if !run_dir.is_dir() {
            return None;
        }

        let mut vulnerabilities = Vec::new();
        if let Ok(mut entries) = tokio::fs::read_dir(run_dir.join(FINDINGS_DIR)).await {
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                match read_finding(&path).await {
                    Some(record) => vulnerabilities.push(record),
                    None => {
                        warn!(run = %run_id, file = %path.display(), "Skipping unreadable finding document");
                    }
                }
            }
        }
        vulnerabilities.sort_by(|a, b| a.id.cmp(&b.id));

        Some(ScanStatus {
            vulnerabilities,
            ..ScanStatus::empty()
        })
    }
}

/// Row count of the tabular finding index minus its header, clamped to zero.
async fn read_vuln_count(run_dir: &Path) -> std::io::Result<usize> {
    let index = run_dir.join(FINDINGS_INDEX);
    if !index.exists() {
        return Ok(0);
    }
    let content = tokio::fs::read_to_string(&index).await?;
    Ok(content.lines().count().saturating_sub(1))
}

async fn read_finding(path: &Path) -> Option<VulnerabilityRecord> {
    let stem = path.file_stem()?.to_str()?.to_string();
    let content = tokio::fs::read_to_string(path).await.ok()?;
    Some(VulnerabilityRecord {
        id: stem.clone(),
        // The title is not independently recoverable from the document name.
        title: stem,
        severity: "unknown".to_string(),
        content,
    })
}
