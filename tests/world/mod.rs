//! Scenario world for the API feature files
//!
//! Every scenario gets a fresh [`ApiWorld`]: its own session context and
//! execution record. Only the harness settings are shared.

use std::path::PathBuf;
use std::sync::OnceLock;

use apibdd::common::config::{selected_environment_name, Config, EnvironmentConfig};
use apibdd::{ApiContext, ExecutionRecord};
use cucumber::World;

/// Environment name under which the in-process mock is registered
pub const MOCK_ENVIRONMENT: &str = "mock";

/// Settings shared by all scenarios of a run
#[derive(Debug)]
pub struct Harness {
    pub config: Config,
    /// Environment every scenario starts in
    pub environment: String,
    pub schemas_dir: PathBuf,
}

impl Harness {
    /// Build the run settings from the loaded config
    ///
    /// The mock is added as the `mock` environment. Scenarios target it
    /// unless `API_ENV` names another one; an unknown name leaves the base
    /// URL empty. The login fixture follows the mock only while the mock is
    /// the selected environment.
    pub fn new(mut config: Config, mock_base_url: &str) -> Self {
        config.environments.insert(
            MOCK_ENVIRONMENT.to_string(),
            EnvironmentConfig {
                base_url: mock_base_url.to_string(),
                timeout_ms: 5_000,
            },
        );

        let environment = selected_environment_name(MOCK_ENVIRONMENT);
        if environment == MOCK_ENVIRONMENT {
            config.login.default_base_url = mock_base_url.to_string();
        }

        let schemas_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&config.paths.schemas_dir);
        Self {
            config,
            environment,
            schemas_dir,
        }
    }

    pub fn uses_mock(&self) -> bool {
        self.environment == MOCK_ENVIRONMENT
    }
}

static HARNESS: OnceLock<Harness> = OnceLock::new();

/// Install the harness settings; must run before the first scenario
pub fn install(harness: Harness) {
    HARNESS
        .set(harness)
        .expect("harness settings installed twice");
}

pub fn harness() -> &'static Harness {
    HARNESS.get().expect("harness settings not installed")
}

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ApiWorld {
    pub api: ApiContext,
    pub record: ExecutionRecord,
    pub harness: &'static Harness,
}

impl ApiWorld {
    fn new() -> Self {
        let harness = harness();
        let mut api = ApiContext::for_environment(harness.config.environment(&harness.environment));
        if harness.uses_mock() {
            // loopback mock; keep it away from any system proxy
            api.set_use_proxy(false);
        }
        Self {
            api,
            record: ExecutionRecord::new(),
            harness,
        }
    }
}
