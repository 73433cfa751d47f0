//! Server configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/uigen/config.toml`
//! - macOS: `~/Library/Application Support/uigen/config.toml`
//! - Windows: `%APPDATA%\uigen\config.toml`
//!
//! A missing file means defaults; a file that exists but does not parse or
//! validate is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uigen_preview::PreviewConfig;

/// Log levels accepted by `general.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// File name the preview writer produces inside `output.dir`.
pub const PREVIEW_FILE_NAME: &str = "preview.html";

/// Server configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [preview]
/// alias_prefix = "@/"
/// tailwind_cdn = "https://cdn.tailwindcss.com"
/// title = "UIGen Preview"
///
/// [preview.libraries]
/// react = "https://esm.sh/react@19.1.0"
/// "react/jsx-runtime" = "https://esm.sh/react@19.1.0/jsx-runtime"
/// "react-dom/client" = "https://esm.sh/react-dom@19.1.0/client?external=react"
///
/// [output]
/// dir = "./preview"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Preview compiler settings
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Where rendered previews are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving `preview.html`
    pub dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./preview"),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the log level is unknown or the preview section
    /// is unusable.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        self.preview
            .validate()
            .context("invalid [preview] section")?;

        Ok(())
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or validate.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default location falls back to
    /// built-in defaults when no file is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = default_config_path()?;
        if !default_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&default_path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Gets the default configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no configuration directory.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;
    Ok(config_dir.join("uigen").join("config.toml"))
}
