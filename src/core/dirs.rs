use crate::core::error::CoverageNavigatorError;
use std::path::PathBuf;

/// Overrides the configuration directory (used by tests and packaged installs)
pub const CONFIG_DIR_ENV: &str = "COVERAGE_NAVIGATOR_CONFIG_DIR";

pub fn get_config_directory() -> Result<PathBuf, CoverageNavigatorError> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join("coverage-navigator"))
        .ok_or(CoverageNavigatorError::ConfigDirectoryNotFound)
}
