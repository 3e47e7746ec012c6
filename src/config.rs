//! Configuration for the wizard engine

use crate::checkpoint::{default_data_dir, FileStorage, SnapshotFormat};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the persisted draft blob
pub const DEFAULT_STORAGE_KEY: &str = "membership-application-storage";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Name of the persisted draft
    pub storage_key: String,
    /// Directory holding the draft; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
    /// Encoding of the persisted draft
    pub snapshot_format: SnapshotFormat,
    /// Base URL of the applications API
    pub api_base_url: Option<String>,
    /// Request timeout for submission, in seconds
    pub request_timeout_secs: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            snapshot_format: SnapshotFormat::Json,
            api_base_url: None,
            request_timeout_secs: 30,
        }
    }
}

impl WizardConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "membership", "membership-wizard")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config dir, defaults when absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: WizardConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform config dir
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// File storage described by this configuration, if a directory is known
    pub fn file_storage(&self) -> Option<FileStorage> {
        self.storage_dir
            .clone()
            .or_else(default_data_dir)
            .map(|dir| FileStorage::new(dir, &self.storage_key, self.snapshot_format))
    }
}
