//! apibdd - behavior-driven HTTP/JSON API test harness
//!
//! This library provides the per-scenario HTTP session, the step handlers
//! and assertions behind the Gherkin step texts, the `@Login` fixture, and
//! the report and step catalog tooling used by the CLI.

pub mod cli;
pub mod commands;
pub mod common;
pub mod report;
pub mod session;
pub mod stepdocs;
pub mod steps;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use session::{ApiContext, ApiResponse};
pub use steps::ExecutionRecord;
