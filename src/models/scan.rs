use serde::{Deserialize, Serialize};

/// How the caller classified the target of a scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Url,
    Repo,
    Local,
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url => write!(f, "url"),
            Self::Repo => write!(f, "repo"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Request payload for starting a scan.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub target: String,
    pub target_type: TargetType,
    pub instruction: Option<String>,
    pub run_name: Option<String>,
}

impl ScanRequest {
    /// Derive the run name: caller-supplied, or defaulted from the target type.
    pub fn run_name(&self) -> String {
        self.run_name
            .clone()
            .unwrap_or_else(|| format!("web-scan-{}", self.target_type))
    }
}

/// A classified scan target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanTarget {
    WebApplication { target_url: String },
    Repository { target_repo: String },
    LocalCode { target_path: String },
}

impl ScanTarget {
    pub fn classify(target: &str, target_type: TargetType) -> Self {
        match target_type {
            TargetType::Url => Self::WebApplication { target_url: target.to_string() },
            TargetType::Repo => Self::Repository { target_repo: target.to_string() },
            TargetType::Local => Self::LocalCode { target_path: target.to_string() },
        }
    }
}

/// Fully resolved configuration handed to the agent for one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub scan_id: String,
    pub run_name: String,
    pub targets: Vec<ScanTarget>,
    pub user_instructions: String,
}

impl ScanConfig {
    pub fn from_request(request: &ScanRequest, run_name: &str) -> Self {
        Self {
            scan_id: run_name.to_string(),
            run_name: run_name.to_string(),
            targets: vec![ScanTarget::classify(&request.target, request.target_type)],
            user_instructions: request.instruction.clone().unwrap_or_default(),
        }
    }
}
