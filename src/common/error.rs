//! Error types for the API harness
//!
//! Every failure a step can produce is one variant of [`Error`]. Variants fall
//! into two categories: setup errors (the environment or the scenario text is
//! broken) and assertion errors (the API did not behave as expected). Soft
//! conditions such as a non-JSON response body never become errors; they are
//! logged where they happen.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Failed to initialize HTTP transport: {0}")]
    TransportInit(#[source] reqwest::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{method} request to {url} failed: {source}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    // === Step Errors ===
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Request body is not valid JSON: {0}")]
    RequestBody(#[source] serde_json::Error),

    #[error("Expected JSON block is not valid JSON: {0}")]
    ExpectedJson(#[source] serde_json::Error),

    #[error("No value stored under '{0}'")]
    MissingStashValue(String),

    #[error("Step table is malformed: {0}")]
    MalformedTable(String),

    // === Schema Errors ===
    #[error("Schema file not found: {0}")]
    SchemaNotFound(String),

    #[error("Invalid JSON schema '{path}': {reason}")]
    InvalidSchema { path: String, reason: String },

    // === Assertion Errors ===
    #[error("No response has been recorded for this scenario")]
    NoResponse,

    #[error("Expected status code {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("Schema validation failed: {0}")]
    SchemaViolation(String),

    #[error("Response body mismatch. Expected: {expected}, got: {actual}")]
    BodyMismatch { expected: String, actual: String },

    #[error("Response field '{0}' is not defined")]
    MissingField(String),

    #[error("Field '{field}': expected {expected}, got {actual}")]
    FieldMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Report error: {0}")]
    Report(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which side of the taxonomy an error sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The environment or the scenario definition is broken
    Setup,
    /// The API response violated an expectation
    Assertion,
}

impl Error {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NoResponse
            | Error::StatusMismatch { .. }
            | Error::SchemaViolation(_)
            | Error::BodyMismatch { .. }
            | Error::MissingField(_)
            | Error::FieldMismatch { .. } => ErrorCategory::Assertion,
            _ => ErrorCategory::Setup,
        }
    }

    /// Whether this error is an expectation violation
    pub fn is_assertion(&self) -> bool {
        self.category() == ErrorCategory::Assertion
    }

    /// Create a request failed error
    pub fn request(method: &str, url: &str, source: reqwest::Error) -> Self {
        Self::Request {
            method: method.to_string(),
            url: url.to_string(),
            source,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a body mismatch error from the two JSON values
    pub fn body_mismatch(expected: &serde_json::Value, actual: Option<&serde_json::Value>) -> Self {
        Self::BodyMismatch {
            expected: expected.to_string(),
            actual: actual.map_or_else(|| "undefined".to_string(), |v| v.to_string()),
        }
    }

    /// Create a field mismatch error
    pub fn field_mismatch(
        field: &str,
        expected: &serde_json::Value,
        actual: &serde_json::Value,
    ) -> Self {
        Self::FieldMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
