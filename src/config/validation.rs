use crate::error::AppError;
use std::path::Path;

use super::{Config, JobConfig};

/// Validates the configuration settings
///
/// # Validation Rules
/// - Both base URLs must be non-empty http(s) URLs
/// - HTTP timeout must be greater than zero
/// - Output directory cannot be empty
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
/// - Every configured job needs a non-empty league id
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_base_url("draft_base_url", &config.draft_base_url)?;
    validate_base_url("classic_base_url", &config.classic_base_url)?;

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be greater than zero",
        ));
    }

    if config.output_dir.trim().is_empty() {
        return Err(AppError::config_error("Output directory cannot be empty"));
    }

    if let Some(log_path) = &config.log_file_path {
        validate_log_path(log_path)?;
    }

    for (index, job) in config.jobs.iter().enumerate() {
        validate_job(index, job)?;
    }

    Ok(())
}

fn validate_base_url(name: &str, url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::config_error(format!("{name} cannot be empty")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{name} must start with http:// or https:// (got '{url}')"
        )));
    }
    Ok(())
}

fn validate_log_path(log_path: &str) -> Result<(), AppError> {
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    if let Some(parent) = Path::new(log_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

fn validate_job(index: usize, job: &JobConfig) -> Result<(), AppError> {
    if job.league_id.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "Job #{} ({}) has an empty league_id",
            index + 1,
            job.kind
        )));
    }
    Ok(())
}
