//! Configuration and artifact paths
//!
//! Config lookup order:
//! 1. `$APIBDD_CONFIG`
//! 2. `./apibdd.toml`
//! 3. the platform config directory (`directories` crate)

use std::path::{Path, PathBuf};

/// Name used for the project config directory
const APP_NAME: &str = "apibdd";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "APIBDD_CONFIG";

/// Config file name looked up in the working directory
const LOCAL_CONFIG: &str = "apibdd.toml";

/// File name of the cucumber JSON report
pub const REPORT_FILE: &str = "cucumber-report.json";

/// File name of the generated step catalog
pub const STEPS_DOC_FILE: &str = "steps.md";

/// Get the configuration directory path
///
/// - Linux: `~/.config/apibdd/`
/// - macOS: `~/Library/Application Support/apibdd/`
/// - Windows: `%APPDATA%\apibdd\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path of the first existing configuration file
pub fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(explicit));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    config_dir()
        .map(|dir| dir.join("config.toml"))
        .filter(|path| path.exists())
}

/// Resolve a schema path from a step against the schema root
pub fn schema_path(root: &Path, relative: &str) -> PathBuf {
    root.join(relative.trim_start_matches('/'))
}

/// Path of the JSON report inside a reports directory
pub fn report_path(reports_dir: &Path) -> PathBuf {
    reports_dir.join(REPORT_FILE)
}

/// Path of the step catalog inside a docs directory
pub fn steps_doc_path(docs_dir: &Path) -> PathBuf {
    docs_dir.join(STEPS_DOC_FILE)
}
