//! Configuration management
//!
//! `settings.json` in the data directory:
//! ```json
//! {
//!   "baseUrl": "https://budget-tracker-app-pnwq.onrender.com",
//!   "downloadsDir": "/home/me/Downloads",
//!   "toastDurationMs": 3000
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://budget-tracker-app-pnwq.onrender.com";
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    downloads_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toast_duration_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub downloads_dir: PathBuf,
    pub toast_duration: Duration,
    // Values as found in settings.json, before env overrides
    raw: SettingsFile,
}

impl Config {
    pub fn new(base_url: &str, downloads_dir: PathBuf) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            downloads_dir,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            raw: SettingsFile::default(),
        }
    }

    /// Load config from the data directory
    ///
    /// `BUDGET_BASE_URL` and `BUDGET_DOWNLOADS_DIR` override the file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with(data_dir, |key| std::env::var(key).ok())
    }

    fn load_with(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings(&data_dir.join(SETTINGS_FILENAME))?;

        let base_url = env("BUDGET_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| raw.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let downloads_dir = env("BUDGET_DOWNLOADS_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| raw.downloads_dir.clone())
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.join("downloads"));

        let toast_duration =
            Duration::from_millis(raw.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS));

        Ok(Self {
            base_url,
            downloads_dir,
            toast_duration,
            raw,
        })
    }

    /// Set a new base URL (None restores the default)
    pub fn set_base_url(&mut self, base_url: Option<&str>) -> Result<()> {
        if let Some(url) = base_url {
            let parsed =
                url::Url::parse(url).with_context(|| format!("Invalid server URL '{}'", url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("Server URL must use http or https: {}", url);
            }
        }
        self.raw.base_url = base_url.map(|u| u.trim_end_matches('/').to_string());
        self.base_url = self
            .raw
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(())
    }

    pub fn set_downloads_dir(&mut self, dir: PathBuf) {
        self.raw.downloads_dir = Some(dir.clone());
        self.downloads_dir = dir;
    }

    /// Save config to the data directory
    ///
    /// Only values set in the file or through the setters are written, so an
    /// env override never gets baked into settings.json.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILENAME);

        // Re-read to keep keys written by other tools since we loaded
        let mut settings = read_settings(&settings_path)?;
        settings.base_url = self.raw.base_url.clone();
        settings.downloads_dir = self.raw.downloads_dir.clone();
        settings.toast_duration_ms = self.raw.toast_duration_ms;

        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "ignoring unreadable settings: {}", e);
        SettingsFile::default()
    }))
}
