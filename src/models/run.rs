use serde::{Deserialize, Serialize};

/// Summary of one persisted run, reconstructed from disk artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub run_name: String,
    /// RFC 3339 timestamp taken from the run directory's mtime.
    pub start_time: String,
    /// Always "completed" for reconstructed runs; the artifact layout does
    /// not record failed or cancelled outcomes.
    pub status: String,
    pub vuln_count: usize,
}

/// One discovered issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub id: String,
    pub title: String,
    pub severity: String,
    pub content: String,
}
