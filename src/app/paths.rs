// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`EVENT_LENS_DATA_DIR`, `EVENT_LENS_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! Downloaded media goes to the platform download directory unless an
//! explicit directory is given.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "EventLens";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "EVENT_LENS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "EVENT_LENS_CONFIG_DIR";

/// Global CLI override for data directory (set once at startup).
static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// Should be called once at startup, before any path is resolved. Later
/// calls are ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err() {
        log::warn!("CLI data dir override already initialized");
    }
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        log::warn!("CLI config dir override already initialized");
    }
}

fn cli_dir(slot: &OnceLock<Option<PathBuf>>) -> Option<PathBuf> {
    slot.get().and_then(Clone::clone)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or_else(|| cli_dir(cli))
        .or_else(|| env_dir(env_var))
        .or_else(|| {
            platform.map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the application data directory path.
///
/// Holds the persisted session store (tokens, cached search results).
///
/// Returns `None` if the data directory cannot be determined (rare edge case).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
///
/// # Arguments
///
/// * `override_path` - Optional path to use instead of default. Takes highest priority.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the application config directory path (holds `settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        &CLI_CONFIG_DIR,
        ENV_CONFIG_DIR,
        dirs::config_dir(),
    )
}

/// Returns the directory downloaded media is written to.
///
/// Falls back to the platform download directory, then the current
/// directory. No application subdirectory is appended.
pub fn get_download_dir_with_override(override_path: Option<PathBuf>) -> PathBuf {
    override_path
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
