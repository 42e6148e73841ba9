//! HTTP transport bound to a base URL and a default header set
//!
//! A transport is immutable once built. Changing the base URL, headers or
//! token means building a new one; the session context takes care of that.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::common::{Error, Result};

use super::response::ApiResponse;

/// Settings a transport is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Route requests through the system proxy settings
    pub use_proxy: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            use_proxy: true,
        }
    }
}

/// An HTTP client session
#[derive(Debug)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
    headers: BTreeMap<String, String>,
}

impl Transport {
    /// Build a transport
    ///
    /// Certificate errors are ignored so self-signed test environments work.
    pub fn new(
        base_url: &str,
        headers: &BTreeMap<String, String>,
        options: &TransportOptions,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(true);
        if !options.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(Error::TransportInit)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            headers: headers.clone(),
        })
    }

    /// Base URL this transport was built with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Resolve a request URL against the base URL
    ///
    /// Absolute URLs are used as-is; relative ones are joined to the base URL
    /// with standard URL resolution.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(url) {
            return Ok(absolute);
        }

        let base = Url::parse(&self.base_url).map_err(|e| Error::invalid_url(url, e))?;
        base.join(url).map_err(|e| Error::invalid_url(url, e))
    }

    /// Issue a request and buffer the response
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        params: Option<&[(String, String)]>,
        data: Option<&Value>,
    ) -> std::result::Result<ApiResponse, reqwest::Error> {
        let mut request = self.client.request(method, url);
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            request = request.query(params);
        }
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        ApiResponse::read(response).await
    }
}
