//! Common utilities shared by the CLI, the library and the scenario runner

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, ErrorCategory, Result};
