//! Application settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use keyroster_api::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Result;

/// Settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend root serving `/accounts`.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Show desktop popups instead of only logging notifications.
    pub desktop_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: ClientConfig::DEFAULT_BASE_URL.to_string(),
            timeout_secs: ClientConfig::DEFAULT_TIMEOUT.as_secs(),
            desktop_notifications: false,
        }
    }
}

impl Settings {
    /// Default settings file: `<config dir>/keyroster/settings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyroster")
            .join("settings.json")
    }

    /// Load settings from the default path, writing defaults there on first
    /// run.
    ///
    /// # Errors
    ///
    /// See [`Settings::load_or_init`].
    pub async fn load() -> Result<Self> {
        Self::load_or_init(&Self::default_path()).await
    }

    /// Load settings from `path`, or save the defaults there if it is missing.
    ///
    /// Failing to write the defaults is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_or_init(path: &Path) -> Result<Self> {
        if tokio::fs::try_exists(path).await? {
            return Self::load_from(path).await;
        }

        let settings = Self::default();
        if let Err(e) = settings.save_to(path).await {
            warn!("Could not write default settings to {}: {e}", path.display());
        }
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults if it is missing.
    ///
    /// Keys absent from the file keep their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Client configuration derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid URL.
    pub fn client_config(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::new(&self.api_url)?.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
