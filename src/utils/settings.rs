use dioxus::logger::tracing;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::config::*;
use crate::contexts::{SettingsError, SettingsResult};

/// What to do with a lookup response that arrives after a newer lookup was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleResponsePolicy {
    /// Every response is applied in the order it resolves
    #[default]
    LastResolved,
    /// Only the response to the most recently issued lookup is applied
    Latest,
}

/// Runtime settings, read from `settings.toml` in the platform config directory
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub suggest_url: String,
    pub image_base: String,
    pub min_length: usize,
    pub stale_responses: StaleResponsePolicy,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suggest_url: DEFAULT_SUGGEST_URL.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            min_length: MIN_TERM_LENGTH,
            stale_responses: StaleResponsePolicy::default(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Location of the settings file, if the platform has a config directory
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load settings from the default location and the environment.
    ///
    /// Problems are logged and fall back to the defaults; they never stop the app.
    pub fn load() -> Settings {
        let from_file = match Self::settings_path() {
            Some(path) => Self::from_file(&path),
            None => Ok(Settings::default()),
        };

        let settings = from_file
            .and_then(|settings| settings.with_overrides(|key| std::env::var(key).ok()))
            .unwrap_or_else(|e| {
                tracing::error!("Failed to load settings, using defaults: {}", e);
                Settings::default()
            });

        tracing::debug!("Using settings: {:?}", settings);
        settings
    }

    /// Read a settings file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> SettingsResult<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> SettingsResult<Settings> {
        let settings: Settings = toml::from_str(content)?;
        settings.validated()
    }

    /// Apply environment-style overrides through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> SettingsResult<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SUGGEST_URL_ENV) {
            self.suggest_url = url;
        }
        if let Some(base) = lookup(IMAGE_BASE_ENV) {
            self.image_base = base;
        }
        self.validated()
    }

    /// Parsed suggestion endpoint
    pub fn suggest_endpoint(&self) -> SettingsResult<Url> {
        Url::parse(&self.suggest_url)
            .map_err(|e| SettingsError::InvalidUrl(format!("{}: {}", self.suggest_url, e)))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validated(mut self) -> SettingsResult<Settings> {
        self.suggest_endpoint()?;
        self.min_length = self.min_length.max(1);
        let trimmed = self.image_base.trim_end_matches('/').len();
        self.image_base.truncate(trimmed);
        Ok(self)
    }
}
