//! Cucumber JSON report reading and summary
//!
//! The scenario runner writes the standard Cucumber JSON document; HTML
//! rendering is left to external report generators. This module checks the
//! document is usable and reduces it to pass/fail counts.

use std::path::Path;

use serde::Deserialize;

use crate::common::config::active_environment_name;
use crate::common::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A scenario or background
#[derive(Debug, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub result: StepResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct StepResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Outcome of a scenario derived from its steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Skipped,
}

impl Element {
    pub fn is_background(&self) -> bool {
        self.kind == "background"
    }

    /// Failed if any step failed or was undefined, skipped if any step was
    /// not run, passed otherwise
    pub fn status(&self) -> ScenarioStatus {
        let statuses = || self.steps.iter().map(|s| s.result.status.as_str());
        if statuses().any(|s| s == "failed" || s == "undefined" || s == "ambiguous") {
            ScenarioStatus::Failed
        } else if statuses().any(|s| s != "passed") {
            ScenarioStatus::Skipped
        } else {
            ScenarioStatus::Passed
        }
    }
}

/// A failed step with its location
#[derive(Debug, Clone)]
pub struct Failure {
    pub feature: String,
    pub scenario: String,
    pub step: String,
    pub message: String,
}

/// Run metadata printed alongside the summary
#[derive(Debug, Clone)]
pub struct Metadata {
    pub app_version: &'static str,
    pub environment: String,
    pub platform: &'static str,
}

impl Metadata {
    pub fn current() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION"),
            environment: active_environment_name(),
            platform: std::env::consts::OS,
        }
    }
}

/// Pass/fail counts for a whole report
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub features: usize,
    pub scenarios_passed: usize,
    pub scenarios_failed: usize,
    pub scenarios_skipped: usize,
    pub steps_passed: usize,
    pub steps_failed: usize,
    pub steps_skipped: usize,
    pub failures: Vec<Failure>,
}

impl Summary {
    pub fn scenarios_total(&self) -> usize {
        self.scenarios_passed + self.scenarios_failed + self.scenarios_skipped
    }

    pub fn steps_total(&self) -> usize {
        self.steps_passed + self.steps_failed + self.steps_skipped
    }

    pub fn success(&self) -> bool {
        self.scenarios_failed == 0
    }
}

/// Load and parse a report file
///
/// A missing, empty or malformed file is an error: it means the run did not
/// produce a report, not that it had zero scenarios.
pub fn load(path: &Path) -> Result<Vec<Feature>> {
    if !path.exists() {
        return Err(Error::Report(format!(
            "JSON report file not found at {}. Make sure the scenario runner is configured to generate a JSON report",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    parse(&content).map_err(|e| match e {
        Error::Report(msg) => Error::Report(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse report JSON text
pub fn parse(content: &str) -> Result<Vec<Feature>> {
    if content.trim().is_empty() {
        return Err(Error::Report("JSON report file is empty".to_string()));
    }
    serde_json::from_str(content)
        .map_err(|e| Error::Report(format!("error parsing JSON report: {}", e)))
}

/// Reduce features to a summary
pub fn summarize(features: &[Feature]) -> Summary {
    let mut summary = Summary {
        features: features.len(),
        ..Summary::default()
    };

    for feature in features {
        for element in &feature.elements {
            for step in &element.steps {
                match step.result.status.as_str() {
                    "passed" => summary.steps_passed += 1,
                    "failed" | "undefined" | "ambiguous" => {
                        summary.steps_failed += 1;
                        summary.failures.push(Failure {
                            feature: feature.name.clone(),
                            scenario: element.name.clone(),
                            step: format!("{}{}", step.keyword, step.name),
                            message: step
                                .result
                                .error_message
                                .clone()
                                .unwrap_or_else(|| step.result.status.clone()),
                        });
                    }
                    _ => summary.steps_skipped += 1,
                }
            }

            if element.is_background() {
                continue;
            }
            match element.status() {
                ScenarioStatus::Passed => summary.scenarios_passed += 1,
                ScenarioStatus::Failed => summary.scenarios_failed += 1,
                ScenarioStatus::Skipped => summary.scenarios_skipped += 1,
            }
        }
    }

    summary
}
