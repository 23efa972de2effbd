//! Academy configuration
//!
//! Config file: `<config_dir>/osint-detective/config.toml`. A missing file
//! means defaults. Instructor credentials can also come from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "osint-detective";

/// Environment variable for the instructor endpoint
pub const ENV_INSTRUCTOR_BASE_URL: &str = "AI_INTEGRATIONS_OPENAI_BASE_URL";

/// Environment variable for the instructor API key
pub const ENV_INSTRUCTOR_API_KEY: &str = "AI_INTEGRATIONS_OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding player progress
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("progress.db")
}

/// LLM instructor endpoint (OpenAI-compatible)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorConfig {
    /// Unset means the instructor is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on one grading call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,
}

impl Default for InstructorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_completion_tokens: default_max_completion_tokens(),
        }
    }
}

impl InstructorConfig {
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().map_or(false, |url| !url.trim().is_empty())
    }
}

fn default_model() -> String {
    "gpt-5-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_completion_tokens() -> u32 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademyConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub instructor: InstructorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AcademyConfig {
    /// `<config_dir>/osint-detective/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load from `path`, or the default location, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut config = Self::from_file(&path)?;
        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file; a missing file yields defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Overlay non-empty values from `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_INSTRUCTOR_BASE_URL) {
            self.instructor.base_url = Some(url);
        }
        if let Some(key) = non_empty(ENV_INSTRUCTOR_API_KEY) {
            self.instructor.api_key = Some(key);
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let toml_string = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, toml_string).with_context(|| format!("Failed to write {}", path.display()))
    }
}
