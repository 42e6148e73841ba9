//! Configuration file handling
//!
//! The harness reads an optional TOML file describing the named target
//! environments, the login fixture and the directories it works with. Every
//! section has built-in defaults, so a missing file is not an error.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Environment variable selecting the active environment
pub const ENV_VAR: &str = "API_ENV";

/// Environment used when `API_ENV` is unset
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Named target environments
    #[serde(default = "default_environments")]
    pub environments: BTreeMap<String, EnvironmentConfig>,

    /// Pre-scenario login fixture settings
    #[serde(default)]
    pub login: LoginConfig,

    /// Directory settings
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environments: default_environments(),
            login: LoginConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// A target environment: where requests go and how long they may take
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Base URL prepended to relative endpoints
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl EnvironmentConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_environments() -> BTreeMap<String, EnvironmentConfig> {
    let mut environments = BTreeMap::new();
    environments.insert(
        "development".to_string(),
        EnvironmentConfig {
            base_url: "https://dummyjson.com".to_string(),
            timeout_ms: default_timeout_ms(),
        },
    );
    environments.insert(
        "staging".to_string(),
        EnvironmentConfig {
            base_url: "https://staging-api-url.com".to_string(),
            timeout_ms: default_timeout_ms(),
        },
    );
    environments
}

/// Credentials and endpoint used by the `@Login` fixture
#[derive(Debug, Deserialize, Clone)]
pub struct LoginConfig {
    /// Login endpoint, relative to the base URL
    #[serde(default = "default_login_endpoint")]
    pub endpoint: String,

    /// Username sent by the fixture
    #[serde(default = "default_username")]
    pub username: String,

    /// Password sent by the fixture
    #[serde(default = "default_password")]
    pub password: String,

    /// Base URL applied when a scenario has not set one
    #[serde(default = "default_login_base_url")]
    pub default_base_url: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            endpoint: default_login_endpoint(),
            username: default_username(),
            password: default_password(),
            default_base_url: default_login_base_url(),
        }
    }
}

fn default_login_endpoint() -> String {
    "/auth/login".to_string()
}
fn default_username() -> String {
    "emilys".to_string()
}
fn default_password() -> String {
    "emilyspass".to_string()
}
fn default_login_base_url() -> String {
    "https://dummyjson.com".to_string()
}

/// Directories the harness reads from and writes to
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Root that schema paths in steps are resolved against
    #[serde(default = "default_schemas_dir")]
    pub schemas_dir: PathBuf,

    /// Where the cucumber JSON report is written
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Where the step catalog is written
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schemas_dir: default_schemas_dir(),
            reports_dir: default_reports_dir(),
            docs_dir: default_docs_dir(),
        }
    }
}

fn default_schemas_dir() -> PathBuf {
    PathBuf::from("tests/schemas")
}
fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

impl Config {
    /// Load configuration from the first config file found
    ///
    /// Returns default configuration if no file exists
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Look up an environment by name
    ///
    /// Unknown names yield `None`; there is no fallback environment.
    pub fn environment(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.get(name)
    }

    /// The environment selected by `API_ENV`
    pub fn active_environment(&self) -> Option<&EnvironmentConfig> {
        self.environment(&active_environment_name())
    }
}

/// Name of the environment selected by `API_ENV`, or the default
pub fn active_environment_name() -> String {
    selected_environment_name(DEFAULT_ENVIRONMENT)
}

/// Name of the environment selected by `API_ENV`, or `fallback`
pub fn selected_environment_name(fallback: &str) -> String {
    std::env::var(ENV_VAR)
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
