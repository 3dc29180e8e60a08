// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[api]` - Remote API base URL and request timeout
//! - `[gallery]` - Page sizes and scroll lookahead
//! - `[session]` - Inactivity timeout and long-press threshold
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `EVENT_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! The API base URL can additionally be overridden with `EVENT_LENS_API_URL`.
//!
//! # Examples
//!
//! ```no_run
//! use event_lens::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.gallery.photo_page_size = Some(48);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::gallery::GalleryKind;
use crate::domain::session::{InactivityTimeout, LongPressThreshold, LookaheadMargin, PageSize};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "EVENT_LENS_API_URL";

// =============================================================================
// Section Structs
// =============================================================================

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the event API (e.g., "https://api.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single request, in seconds.
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_secs: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Request timeout, clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(u64::from(secs))
    }
}

/// Gallery browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Items revealed per scroll step in photo grids.
    #[serde(
        default = "default_photo_page_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_page_size: Option<usize>,

    /// Items revealed per scroll step in video grids.
    #[serde(
        default = "default_video_page_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_page_size: Option<usize>,

    /// Lookahead margin before the end of the list, in pixels.
    #[serde(default = "default_lookahead_px", skip_serializing_if = "Option::is_none")]
    pub lookahead_px: Option<u32>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            photo_page_size: default_photo_page_size(),
            video_page_size: default_video_page_size(),
            lookahead_px: default_lookahead_px(),
        }
    }
}

impl GalleryConfig {
    /// Page size for the given gallery kind.
    #[must_use]
    pub fn page_size(&self, kind: GalleryKind) -> PageSize {
        let raw = match kind {
            GalleryKind::General => self.photo_page_size.unwrap_or(DEFAULT_PHOTO_PAGE_SIZE),
            GalleryKind::Videos => self.video_page_size.unwrap_or(DEFAULT_VIDEO_PAGE_SIZE),
        };
        PageSize::new(raw)
    }

    #[must_use]
    pub fn lookahead(&self) -> LookaheadMargin {
        LookaheadMargin::new(self.lookahead_px.unwrap_or(DEFAULT_LOOKAHEAD_PX))
    }
}

/// Session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Inactivity period before the session expires, in seconds.
    #[serde(
        default = "default_inactivity_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub inactivity_timeout_secs: Option<u32>,

    /// Inactivity period in milliseconds. Takes precedence over
    /// `inactivity_timeout_secs` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout_ms: Option<u64>,

    /// Long-press threshold, in milliseconds.
    #[serde(default = "default_long_press_ms", skip_serializing_if = "Option::is_none")]
    pub long_press_ms: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
            inactivity_timeout_ms: None,
            long_press_ms: default_long_press_ms(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn inactivity_timeout(&self) -> InactivityTimeout {
        match self.inactivity_timeout_ms {
            Some(ms) => InactivityTimeout::from_millis(ms),
            None => InactivityTimeout::new(
                self.inactivity_timeout_secs
                    .unwrap_or(DEFAULT_INACTIVITY_TIMEOUT_SECS),
            ),
        }
    }

    #[must_use]
    pub fn long_press(&self) -> LongPressThreshold {
        LongPressThreshold::new(self.long_press_ms.unwrap_or(DEFAULT_LONG_PRESS_MS))
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Application configuration with sectioned layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Applies the `EVENT_LENS_API_URL` override, if set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
        self
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> Option<u32> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_photo_page_size() -> Option<usize> {
    Some(DEFAULT_PHOTO_PAGE_SIZE)
}

fn default_video_page_size() -> Option<usize> {
    Some(DEFAULT_VIDEO_PAGE_SIZE)
}

fn default_lookahead_px() -> Option<u32> {
    Some(DEFAULT_LOOKAHEAD_PX)
}

fn default_inactivity_timeout_secs() -> Option<u32> {
    Some(DEFAULT_INACTIVITY_TIMEOUT_SECS)
}

fn default_long_press_ms() -> Option<u32> {
    Some(DEFAULT_LONG_PRESS_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some(format!("Failed to load {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Err(Error::Config("no config directory available".to_string()))
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{inactivity_bounds, long_press_bounds, page_size_bounds};
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                request_timeout_secs: Some(12),
            },
            gallery: GalleryConfig {
                photo_page_size: Some(30),
                video_page_size: Some(8),
                lookahead_px: Some(320),
            },
            session: SessionConfig {
                inactivity_timeout_secs: Some(90),
                inactivity_timeout_ms: Some(1_500),
                long_press_ms: Some(450),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[api]\nbase_url = \"http://10.0.0.2:8000\"\n")
            .expect("write file");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded.api.base_url, "http://10.0.0.2:8000");
        assert_eq!(loaded.gallery, GalleryConfig::default());
        assert_eq!(loaded.session, SessionConfig::default());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.gallery.page_size(GalleryKind::General).value(), 24);
        assert_eq!(config.gallery.page_size(GalleryKind::Videos).value(), 16);
        assert_eq!(config.gallery.lookahead().value(), 200);
        assert_eq!(config.session.inactivity_timeout().as_secs(), 300);
        assert_eq!(config.session.long_press().value(), 600);
    }

    #[test]
    fn inactivity_milliseconds_override_seconds() {
        let mut session = SessionConfig {
            inactivity_timeout_secs: Some(90),
            ..SessionConfig::default()
        };
        assert_eq!(session.inactivity_timeout().as_secs(), 90);

        session.inactivity_timeout_ms = Some(2_500);
        assert_eq!(session.inactivity_timeout().as_millis(), 2_500);
    }

    #[test]
    fn domain_bounds_match_config() {
        assert_eq!(page_size_bounds::PHOTOS, DEFAULT_PHOTO_PAGE_SIZE);
        assert_eq!(page_size_bounds::VIDEOS, DEFAULT_VIDEO_PAGE_SIZE);
        assert_eq!(
            inactivity_bounds::DEFAULT_SECS,
            DEFAULT_INACTIVITY_TIMEOUT_SECS
        );
        assert_eq!(long_press_bounds::DEFAULT_MS, DEFAULT_LONG_PRESS_MS);
    }

    #[test]
    fn request_timeout_is_clamped() {
        let api = ApiConfig {
            base_url: default_base_url(),
            request_timeout_secs: Some(0),
        };
        assert_eq!(api.request_timeout(), Duration::from_secs(1));

        let api = ApiConfig {
            base_url: default_base_url(),
            request_timeout_secs: None,
        };
        assert_eq!(api.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.session.inactivity_timeout_secs = Some(45);

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.session.inactivity_timeout_secs, Some(45));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_some(), "should warn about parse error");
        assert_eq!(config, Config::default());
    }
}
