//! Settings file for the CLI.
//!
//! Stored as JSON at `~/.portpeek/config.json`. Missing fields fall back to
//! defaults, so an empty object is a valid settings file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use portpeek_core::config::{DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use portpeek_core::ScanConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Settings data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Seconds between scans in `watch` mode.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Path to lsof, if it is not on `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsof_path: Option<String>,

    /// Time bound on one lsof run, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Replaces the built-in permission signatures when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_signatures: Option<Vec<String>>,

    /// Exit codes this host uses for permission denial.
    #[serde(default)]
    pub permission_exit_codes: Vec<i32>,
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            lsof_path: None,
            timeout_secs: default_timeout_secs(),
            permission_signatures: None,
            permission_exit_codes: Vec::new(),
        }
    }
}

impl Settings {
    /// Build the scan configuration handed to the core.
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new()
            .with_program(self.lsof_path.as_deref().unwrap_or(DEFAULT_PROGRAM))
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_permission_exit_codes(self.permission_exit_codes.iter().copied());

        if let Some(signatures) = &self.permission_signatures {
            config = config.with_permission_signatures(signatures.iter().cloned());
        }

        config
    }
}

/// Settings store for reading and writing the settings file.
pub struct SettingsStore {
    /// Path to the settings file.
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store at the default path: `~/.portpeek/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self {
            path: home.join(".portpeek").join("config.json"),
        })
    }

    /// Create a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk.
    ///
    /// Returns defaults if the file doesn't exist.
    pub async fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))
    }

    /// Save settings to disk.
    ///
    /// Creates the settings directory if it doesn't exist.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .context("Failed to create settings directory")?;
        }

        let content =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .context("Failed to create temp settings file")?;
        file.write_all(content.as_bytes())
            .await
            .context("Failed to write settings")?;
        file.sync_all().await.context("Failed to sync settings")?;

        fs::rename(&temp_path, &self.path)
            .await
            .context("Failed to rename settings file")?;

        Ok(())
    }

    /// Set the watch refresh interval in seconds.
    pub async fn set_refresh_interval(&self, secs: u64) -> Result<Settings> {
        if secs == 0 {
            return Err(anyhow!("Refresh interval must be at least 1 second"));
        }
        let mut settings = self.load().await?;
        settings.refresh_interval = secs;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Set the lsof timeout in seconds.
    pub async fn set_timeout(&self, secs: u64) -> Result<Settings> {
        if secs == 0 {
            return Err(anyhow!("Timeout must be at least 1 second"));
        }
        let mut settings = self.load().await?;
        settings.timeout_secs = secs;
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Overwrite the settings file with defaults.
    pub async fn reset(&self) -> Result<Settings> {
        let settings = Settings::default();
        self.save(&settings).await?;
        Ok(settings)
    }
}
