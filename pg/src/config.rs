//! progen configuration types and loading
//!
//! This is the tool's own settings file, not a template's `config.yml`.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main progen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory searched for `<type>/<name>` templates
    #[serde(rename = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local .progen.yml, then ~/.config/progen/progen.yml
        let candidates = [
            Some(PathBuf::from(".progen.yml")),
            dirs::config_dir().map(|dir| dir.join("progen").join("progen.yml")),
        ];
        Ok(Self::load_first(candidates.iter().flatten()))
    }

    /// First candidate that exists and loads; unreadable candidates are skipped
    fn load_first<'a>(candidates: impl IntoIterator<Item = &'a PathBuf>) -> Self {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to load config from {}: {}", path.display(), e),
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    /// Load only the log level, ignoring any error
    ///
    /// Used before logging is initialized.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the template base directory
    ///
    /// Priority: CLI override > config file > `<data_local_dir>/progen/templates`.
    pub fn template_base(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_override {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.template_dir {
            return dir.clone();
        }
        default_template_dir()
    }
}

/// Default template search base
pub fn default_template_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("progen")
        .join("templates")
}
