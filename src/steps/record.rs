//! Per-scenario execution record

use serde_json::Value;
use tracing::warn;

use crate::common::{Error, Result};
use crate::session::ApiResponse;

/// The last response of a scenario and its parsed body
///
/// Written by request steps, read by assertion steps.
#[derive(Debug, Default, Clone)]
pub struct ExecutionRecord {
    response: Option<ApiResponse>,
    response_body: Option<Value>,
}

impl ExecutionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a response and eagerly parse its body
    ///
    /// A body that is not JSON is logged and leaves the body undefined; many
    /// endpoints legitimately return empty or plain-text bodies.
    pub fn record(&mut self, response: ApiResponse) {
        self.response_body = match response.json() {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(
                    status = response.status(),
                    "Could not parse response body as JSON: {}", e
                );
                None
            }
        };
        self.response = Some(response);
    }

    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    /// The response, or an assertion failure if no request was made
    pub fn require_response(&self) -> Result<&ApiResponse> {
        self.response.as_ref().ok_or(Error::NoResponse)
    }

    /// Parsed body; `None` when the body was not JSON
    pub fn response_body(&self) -> Option<&Value> {
        self.response_body.as_ref()
    }

    pub fn clear(&mut self) {
        self.response = None;
        self.response_body = None;
    }
}
