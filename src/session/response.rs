//! Buffered HTTP response
//!
//! The body is read once when the response arrives so it can be inspected
//! any number of times by later steps.

use reqwest::header::HeaderMap;
use serde_json::Value;

/// A completed HTTP response with its body in memory
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    url: String,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    /// Build a response by hand (fixtures, offline assertions)
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Buffer a transport response
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(Self {
            status,
            url,
            headers,
            body,
        })
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Final URL the request was sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get a response header as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw body text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
