use crate::aggregator::SecondaryMetric;
use crate::constants::{
    DEFAULT_CLASSIC_BASE_URL, DEFAULT_DRAFT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECONDS, LOG_FILE_NAME,
    env_vars,
};
use crate::data_fetcher::models::LeagueKind;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{default_output_dir, get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the draft game API.
    #[serde(default = "default_draft_base_url")]
    pub draft_base_url: String,
    /// Base URL of the classic fantasy game API.
    #[serde(default = "default_classic_base_url")]
    pub classic_base_url: String,
    /// Root directory that exported tables are written under.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Leagues processed by `run` when no league is given on the command line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobConfig>,
}

/// One `[[jobs]]` entry of the config file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub kind: LeagueKind,
    pub league_id: String,
    /// Secondary metric override; the per-kind default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<SecondaryMetric>,
}

impl JobConfig {
    /// The metric this job runs with
    pub fn effective_metric(&self) -> SecondaryMetric {
        self.metric
            .unwrap_or_else(|| SecondaryMetric::default_for(self.kind))
    }
}

fn default_draft_base_url() -> String {
    DEFAULT_DRAFT_BASE_URL.to_string()
}

fn default_classic_base_url() -> String {
    DEFAULT_CLASSIC_BASE_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            draft_base_url: default_draft_base_url(),
            classic_base_url: default_classic_base_url(),
            output_dir: default_output_dir(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
            jobs: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default config file
    /// location when no path is given. A missing file yields the defaults.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `FPL_MUNGER_OUTPUT_DIR` - Override output directory
    /// - `FPL_MUNGER_LOG_FILE` - Override log file path
    /// - `FPL_MUNGER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - Error occurred while reading, parsing or validating
    pub async fn load(path: Option<&str>) -> Result<Self, AppError> {
        let config_path = path.map(str::to_string).unwrap_or_else(get_config_path);

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if path.is_some() {
            return Err(AppError::config_error(format!(
                "Config file not found: {config_path}"
            )));
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overrides file values with environment variables that are set.
    /// An unparsable timeout value is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(output_dir) = std::env::var(env_vars::OUTPUT_DIR) {
            self.output_dir = output_dir;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Renders the effective configuration for `config --list`.
    pub fn display(&self, config_path: &str) -> String {
        let separator = "────────────────────────────────────";
        let mut lines = vec![
            "Current Configuration".to_string(),
            separator.to_string(),
            "Config Location:".to_string(),
            config_path.to_string(),
        ];
        if !Path::new(config_path).exists() {
            lines.push("(Not found, using defaults)".to_string());
        }

        lines.extend([
            separator.to_string(),
            "Draft API:".to_string(),
            self.draft_base_url.clone(),
            separator.to_string(),
            "Classic API:".to_string(),
            self.classic_base_url.clone(),
            separator.to_string(),
            "Output Directory:".to_string(),
            self.output_dir.clone(),
            separator.to_string(),
            "HTTP Timeout:".to_string(),
            format!("{} seconds", self.http_timeout_seconds),
            separator.to_string(),
            "Log File Location:".to_string(),
        ]);
        match &self.log_file_path {
            Some(custom_path) => lines.push(custom_path.clone()),
            None => {
                lines.push(format!("{}/{LOG_FILE_NAME}", get_log_dir_path()));
                lines.push("(Default location)".to_string());
            }
        }

        lines.push(separator.to_string());
        lines.push("Jobs:".to_string());
        if self.jobs.is_empty() {
            lines.push("(none)".to_string());
        }
        for job in &self.jobs {
            lines.push(format!(
                "{} league {} ({})",
                job.kind,
                job.league_id,
                job.effective_metric()
            ));
        }

        lines.join("\n")
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a file path without environment overrides
    /// or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
