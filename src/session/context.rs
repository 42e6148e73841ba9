//! Session context: base URL, headers, token, stash and the live transport
//!
//! One context belongs to one scenario. Configuration setters only record the
//! new state and mark the transport stale; the next request rebuilds it, so a
//! transport is never used after the settings it was built from change.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::common::config::EnvironmentConfig;
use crate::common::{Error, Result};

use super::response::ApiResponse;
use super::stash::{Stash, AUTH_TOKEN};
use super::transport::{Transport, TransportOptions};

const AUTHORIZATION: &str = "Authorization";

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// HTTP session state for one scenario
#[derive(Debug)]
pub struct ApiContext {
    base_url: String,
    headers: BTreeMap<String, String>,
    stash: Stash,
    options: TransportOptions,
    transport: Option<Transport>,
    /// Settings changed since `transport` was built
    stale: bool,
    last_response: Option<ApiResponse>,
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiContext {
    /// Create an empty context with the JSON default headers
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            headers: default_headers(),
            stash: Stash::new(),
            options: TransportOptions::default(),
            transport: None,
            stale: false,
            last_response: None,
        }
    }

    /// Create a context targeting an environment
    ///
    /// `None` (an unknown environment name) leaves the base URL empty.
    pub fn for_environment(environment: Option<&EnvironmentConfig>) -> Self {
        let mut context = Self::new();
        if let Some(env) = environment {
            context.base_url = env.base_url.clone();
            context.options.timeout = env.timeout();
        }
        context
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
        self.stale = true;
    }

    /// Current base URL, `""` if unset
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.options.timeout = timeout;
        self.stale = true;
    }

    pub fn timeout(&self) -> Duration {
        self.options.timeout
    }

    /// Bypass system proxy settings (loopback test servers)
    pub fn set_use_proxy(&mut self, use_proxy: bool) {
        self.options.use_proxy = use_proxy;
        self.stale = true;
    }

    pub fn store_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.stash.insert(key, value);
    }

    /// Get a stashed value; missing keys are `None`
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.stash.get(key)
    }

    pub fn stash(&self) -> &Stash {
        &self.stash
    }

    /// Stash the token and send it as a bearer token from now on
    pub fn set_auth_token(&mut self, token: &str) {
        self.stash.insert(AUTH_TOKEN.name(), token);
        self.headers
            .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        self.stale = true;
    }

    /// The stashed auth token, if any
    pub fn auth_token(&self) -> Option<String> {
        self.stash.get_typed(&AUTH_TOKEN)
    }

    /// Merge a header into the defaults for all future requests
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
        self.stale = true;
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// (Re)create the transport from the current settings
    ///
    /// Any previous transport is disposed first. A token stashed under
    /// `authToken` (for example by a login step) is turned into the
    /// `Authorization` header here.
    pub fn initialize(&mut self) -> Result<()> {
        if self.transport.take().is_some() {
            debug!("Disposed previous HTTP transport");
        }

        if let Some(token) = self.auth_token().filter(|t| !t.is_empty()) {
            self.headers
                .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }

        match Transport::new(&self.base_url, &self.headers, &self.options) {
            Ok(transport) => {
                info!(base_url = %self.base_url, "Initialized HTTP transport");
                self.transport = Some(transport);
                self.stale = false;
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize request context: {}", e);
                Err(e)
            }
        }
    }

    /// The live transport, if one has been built
    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    /// Whether a transport exists and matches the current settings
    pub fn is_initialized(&self) -> bool {
        self.transport.is_some() && !self.stale
    }

    fn ensure_transport(&mut self) -> Result<&Transport> {
        if !self.is_initialized() {
            self.initialize()?;
        }
        self.transport
            .as_ref()
            .ok_or_else(|| Error::Config("HTTP transport is not initialized".to_string()))
    }

    /// Send a GET request, appending `params` as a query string
    pub async fn get(
        &mut self,
        url: &str,
        params: Option<&[(String, String)]>,
    ) -> Result<ApiResponse> {
        let transport = self.ensure_transport()?;
        let target = transport.resolve(url)?;
        debug!(url = %target, "GET");
        let result = transport.send(Method::GET, target, params, None).await;
        self.finish("GET", url, result)
    }

    /// Send a POST request
    ///
    /// Relative URLs are prefixed with the base URL here rather than left to
    /// the transport, so a base URL path segment is preserved.
    pub async fn post(&mut self, url: &str, data: Option<&Value>) -> Result<ApiResponse> {
        let full_url = if url.starts_with("http") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        };

        let transport = self.ensure_transport()?;
        let target = transport.resolve(&full_url)?;
        debug!(url = %target, "POST");
        let result = transport.send(Method::POST, target, None, data).await;
        self.finish("POST", url, result)
    }

    pub async fn put(&mut self, url: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send_with_body(Method::PUT, url, data).await
    }

    pub async fn patch(&mut self, url: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send_with_body(Method::PATCH, url, data).await
    }

    pub async fn delete(&mut self, url: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send_with_body(Method::DELETE, url, data).await
    }

    async fn send_with_body(
        &mut self,
        method: Method,
        url: &str,
        data: Option<&Value>,
    ) -> Result<ApiResponse> {
        let name = method.to_string();
        let transport = self.ensure_transport()?;
        let target = transport.resolve(url)?;
        debug!(url = %target, "{}", name);
        let result = transport.send(method, target, None, data).await;
        self.finish(&name, url, result)
    }

    fn finish(
        &mut self,
        method: &str,
        url: &str,
        result: std::result::Result<ApiResponse, reqwest::Error>,
    ) -> Result<ApiResponse> {
        match result {
            Ok(response) => {
                debug!(status = response.status(), "{} {} completed", method, url);
                self.last_response = Some(response.clone());
                Ok(response)
            }
            Err(e) => {
                error!("Error during {} request to {}: {}", method, url, e);
                Err(Error::request(method, url, e))
            }
        }
    }

    /// The most recent response
    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last_response.as_ref()
    }

    /// Dispose the transport. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("Closed HTTP transport");
        }
    }
}
