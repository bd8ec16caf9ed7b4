use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::errors::VigilError;
use crate::models::{AgentInfo, ScanConfig, ScanTarget, UsageStats, VulnerabilityRecord};
use crate::trace::Tracer;
use super::ScanAgent;

/// Response headers every hardened deployment is expected to send.
const EXPECTED_HEADERS: &[&str] = &[
    "x-content-type-options",
    "x-frame-options",
    "content-security-policy",
];

/// Filenames that should never be reachable inside an assessed tree.
const SENSITIVE_FILES: &[&str] = &[".env", "id_rsa", "credentials.json"];

/// Upper bound on files visited when walking a local target.
const MAX_WALK_ENTRIES: usize = 10_000;

/// Minimal built-in agent used when no external agent is injected.
///
/// Web targets get a reachability probe and a response-header check; local
/// targets get a shallow census with a committed-secrets check. It exists so
/// the control surface is usable end to end; real assessment logic lives in
/// external agents.
pub struct ProbeAgent {
    client: reqwest::Client,
}

impl ProbeAgent {
    pub fn new() -> Result<Self, VigilError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| VigilError::Network(format!("HTTP client init failed: {e}")))?;
        Ok(Self { client })
    }

    async fn probe_web(
        &self,
        url: &str,
        tracer: &Tracer,
    ) -> Result<(), VigilError> {
        tracer
            .record_message("agent", &format!("Probing web application at {url}"))
            .await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| VigilError::Network(format!("Probe of {url} failed: {e}")))?;
        tracer.record_usage(&UsageStats { requests: 1, ..Default::default() }).await;

        let status = response.status();
        tracer
            .record_message("agent", &format!("Target responded with HTTP {status}"))
            .await;

        let missing: Vec<&str> = EXPECTED_HEADERS
            .iter()
            .copied()
            .filter(|h| !response.headers().contains_key(*h))
            .collect();

        if !missing.is_empty() {
            tracer
                .record_vulnerability(VulnerabilityRecord {
                    id: "missing-security-headers".to_string(),
                    title: "Missing security response headers".to_string(),
                    severity: "low".to_string(),
                    content: format!(
                        "GET {url} returned HTTP {status} without: {}",
                        missing.join(", "),
                    ),
                })
                .await;
        }

        Ok(())
    }

    async fn probe_local(
        &self,
        path: &str,
        tracer: &Tracer,
    ) -> Result<(), VigilError> {
        tracer
            .record_message("agent", &format!("Walking local target {path}"))
            .await;

        let root = PathBuf::from(path);
        if !root.is_dir() {
            return Err(VigilError::InvalidTarget(format!("{path} is not a directory")));
        }

        let (file_count, sensitive) = walk_for_sensitive(&root).await?;
        tracer
            .record_message("agent", &format!("Visited {file_count} files under {path}"))
            .await;

        for hit in sensitive {
            let name = hit
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracer
                .record_vulnerability(VulnerabilityRecord {
                    id: format!("sensitive-file-{name}"),
                    title: format!("Sensitive file committed: {name}"),
                    severity: "medium".to_string(),
                    content: format!("Found {} inside the assessed tree", hit.display()),
                })
                .await;
        }

        Ok(())
    }
}

#[async_trait]
impl ScanAgent for ProbeAgent {
    async fn execute_scan(&self, config: &ScanConfig, tracer: Arc<Tracer>) -> Result<(), VigilError> {
        let agent_id = uuid::Uuid::new_v4().to_string();
        tracer
            .register_agent(AgentInfo {
                id: agent_id.clone(),
                name: "probe".to_string(),
                status: "running".to_string(),
                started_at: Utc::now(),
            })
            .await;

        if !config.user_instructions.is_empty() {
            tracer
                .record_message("user", &config.user_instructions)
                .await;
        }

        let result = self.run_targets(config, &tracer).await;
        let final_status = if result.is_ok() { "completed" } else { "failed" };
        tracer.set_agent_status(&agent_id, final_status).await;
        result
    }
}

impl ProbeAgent {
    async fn run_targets(&self, config: &ScanConfig, tracer: &Tracer) -> Result<(), VigilError> {
        for target in &config.targets {
            match target {
                ScanTarget::WebApplication { target_url } => {
                    self.probe_web(target_url, tracer).await?;
                }
                ScanTarget::LocalCode { target_path } => {
                    self.probe_local(target_path, tracer).await?;
                }
                ScanTarget::Repository { target_repo } => {
                    // No checkout capability here; external agents handle repos.
                    info!(repo = %target_repo, "Repository target noted, skipping probe");
                    tracer
                        .record_message(
                            "agent",
                            &format!("Repository {target_repo} requires an external agent"),
                        )
                        .await;
                }
            }
        }
        Ok(())
    }
}

/// Breadth-first walk counting files and collecting sensitive names.
async fn walk_for_sensitive(root: &Path) -> Result<(usize, Vec<PathBuf>), VigilError> {
    let mut pending = vec![root.to_path_buf()];
    let mut file_count = 0usize;
    let mut hits = Vec::new();

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(path);
                continue;
            }

            file_count += 1;
            if file_count >= MAX_WALK_ENTRIES {
                return Ok((file_count, hits));
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if SENSITIVE_FILES.contains(&name) || name.ends_with(".pem") {
                    hits.push(path);
                }
            }
        }
    }

    Ok((file_count, hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScanRequest, TargetType};

    fn local_config(path: &str) -> ScanConfig {
        let request = ScanRequest {
            target: path.to_string(),
            target_type: TargetType::Local,
            instruction: Some("look for secrets".to_string()),
            run_name: Some("probe-test".to_string()),
        };
        ScanConfig::from_request(&request, "probe-test")
    }

    #[tokio::test]
    async fn test_local_probe_flags_dotenv() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("main.rs"), "fn main() {}").unwrap();
        std::fs::write(tmp.path().join(".env"), "DB_PASSWORD=hunter2").unwrap();

        let tracer = Arc::new(Tracer::new("probe-test", tmp.path().join("out")));
        let agent = ProbeAgent::new().unwrap();
        let config = local_config(tmp.path().to_str().unwrap());

        agent.execute_scan(&config, Arc::clone(&tracer)).await.unwrap();

        let status = tracer.snapshot(false).await;
        assert_eq!(status.vulnerabilities.len(), 1);
        assert_eq!(status.vulnerabilities[0].id, "sensitive-file-.env");
        assert_eq!(status.agents.len(), 1);
        assert!(status.agents.values().all(|a| a.status == "completed"));
    }

    #[tokio::test]
    async fn test_local_probe_rejects_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let tracer = Arc::new(Tracer::new("probe-test", tmp.path().join("out")));
        let agent = ProbeAgent::new().unwrap();
        let config = local_config("/definitely/not/here");

        let result = agent.execute_scan(&config, Arc::clone(&tracer)).await;
        assert!(matches!(result, Err(VigilError::InvalidTarget(_))));

        let status = tracer.snapshot(false).await;
        assert!(status.agents.values().all(|a| a.status == "failed"));
    }
}
