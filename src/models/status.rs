use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat-style progress message recorded during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Registration record for an agent participating in a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
}

/// Aggregate usage counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub requests: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl UsageStats {
    pub fn add(&mut self, other: &UsageStats) {
        self.requests += other.requests;
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    pub fn is_empty(&self) -> bool {
        self.requests == 0 && self.input_tokens == 0 && self.output_tokens == 0
    }
}

/// Point-in-time view of a scan. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStatus {
    pub is_running: bool,
    pub logs: Vec<ChatMessage>,
    pub vulnerabilities: Vec<super::run::VulnerabilityRecord>,
    pub agents: HashMap<String, AgentInfo>,
    pub stats: Option<UsageStats>,
}

impl ScanStatus {
    /// The no-live-trace snapshot: nothing running, all collections empty.
    pub fn empty() -> Self {
        Self {
            is_running: false,
            logs: Vec::new(),
            vulnerabilities: Vec::new(),
            agents: HashMap::new(),
            stats: None,
        }
    }
}
