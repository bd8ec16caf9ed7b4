use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::errors::VigilError;

/// Persisted control-surface settings. Plain key-value CRUD, no invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model_name: String,
    pub api_base: Option<String>,
    pub timeout: u64,
    pub default_instruction: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_name: "openai/gpt-4".to_string(),
            api_base: None,
            timeout: 600,
            default_instruction: None,
        }
    }
}

/// JSON-file-backed settings store. A missing or corrupt file falls back to
/// defaults; save failures are the one fault this service propagates.
pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<Settings>,
}

impl SettingsStore {
    pub async fn load(path: PathBuf) -> Self {
        let settings = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt settings file, using defaults");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };

        Self {
            path,
            current: RwLock::new(settings),
        }
    }

    pub async fn get(&self) -> Settings {
        self.current.read().await.clone()
    }

    pub async fn save(&self, settings: Settings) -> Result<(), VigilError> {
        let serialized = serde_json::to_string_pretty(&settings)?;
        if let Err(e) = tokio::fs::write(&self.path, serialized).await {
            error!(path = %self.path.display(), error = %e, "Failed to save settings");
            return Err(VigilError::Config(format!("Failed to save settings: {e}")));
        }
        *self.current.write().await = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(tmp.path().join("absent.json")).await;
        assert_eq!(store.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SettingsStore::load(path).await;
        assert_eq!(store.get().await.timeout, 600);
    }

    #[tokio::test]
    async fn test_save_then_reload_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let store = SettingsStore::load(path.clone()).await;
        let settings = Settings {
            model_name: "anthropic/claude-3".to_string(),
            api_base: Some("http://localhost:4000".to_string()),
            timeout: 120,
            default_instruction: Some("be thorough".to_string()),
        };
        store.save(settings.clone()).await.unwrap();
        assert_eq!(store.get().await, settings);

        let reloaded = SettingsStore::load(path).await;
        assert_eq!(reloaded.get().await, settings);
    }

    #[tokio::test]
    async fn test_save_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        // The parent of the settings path does not exist.
        let store = SettingsStore::load(tmp.path().join("missing-dir").join("config.json")).await;
        let result = store.save(Settings::default()).await;
        assert!(matches!(result, Err(VigilError::Config(_))));
    }
}
