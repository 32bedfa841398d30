use std::path::Path;

use crate::constants::APP_DIR_NAME;

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default root directory for exported tables.
///
/// Uses the platform data directory (e.g., ~/.local/share on Linux), falling
/// back to the current directory.
pub fn default_output_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("output")
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_generation() {
        let config_path = get_config_path();
        assert!(config_path.contains(APP_DIR_NAME));
        assert!(config_path.ends_with("config.toml"));
    }

    #[test]
    fn test_log_dir_path_generation() {
        let log_dir_path = get_log_dir_path();
        assert!(log_dir_path.contains(APP_DIR_NAME));
        assert!(log_dir_path.ends_with("logs"));
    }

    #[test]
    fn test_default_output_dir() {
        let output_dir = default_output_dir();
        assert!(output_dir.contains(APP_DIR_NAME));
        assert!(output_dir.ends_with("output"));
    }
}
