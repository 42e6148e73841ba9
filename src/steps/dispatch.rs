//! Request dispatch for "I send a ... request" steps
//!
//! Step text names the method and endpoint as plain strings. This module
//! resolves `{placeholders}` against the stash, parses the body and routes
//! the call to the matching [`ApiContext`] verb.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::common::{Error, Result};
use crate::session::stash::value_to_text;
use crate::session::{ApiContext, ApiResponse, Stash};

/// Methods a request step may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request described by step text, after variable substitution
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions<'a> {
    pub method: HttpMethod,
    pub endpoint: &'a str,
    /// JSON body text; empty or absent means no body
    pub body: Option<&'a str>,
    /// Query parameters (GET only)
    pub params: Option<&'a [(String, String)]>,
}

impl<'a> RequestOptions<'a> {
    pub fn new(method: HttpMethod, endpoint: &'a str) -> Self {
        Self {
            method,
            endpoint,
            body: None,
            params: None,
        }
    }

    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_params(mut self, params: &'a [(String, String)]) -> Self {
        self.params = Some(params);
        self
    }
}

/// Send a request through the context
///
/// The endpoint gets a leading `/` if it lacks one. A body that is not valid
/// JSON fails the step before anything is sent.
pub async fn send_request(ctx: &mut ApiContext, options: RequestOptions<'_>) -> Result<ApiResponse> {
    let endpoint = if options.endpoint.starts_with('/') {
        options.endpoint.to_string()
    } else {
        format!("/{}", options.endpoint)
    };

    let body = parse_body(options.body)?;

    match options.method {
        HttpMethod::Get => ctx.get(&endpoint, options.params).await,
        HttpMethod::Post => ctx.post(&endpoint, body.as_ref()).await,
        HttpMethod::Put => ctx.put(&endpoint, body.as_ref()).await,
        HttpMethod::Delete => ctx.delete(&endpoint, body.as_ref()).await,
    }
}

fn parse_body(body: Option<&str>) -> Result<Option<Value>> {
    match body {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str(text).map(Some).map_err(Error::RequestBody)
        }
        _ => Ok(None),
    }
}

/// Replace `{name}` tokens with stashed values
///
/// `name` is any run of characters other than braces, quotes and whitespace,
/// so names such as `created-id` or `user.id` resolve while JSON object
/// braces in a body are left alone. Tokens with no stashed value are left as
/// literal text.
pub fn replace_variables(text: &str, stash: &Stash) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let name_len = token_len(after);
        if name_len > 0 && after[name_len..].starts_with('}') {
            let name = &after[..name_len];
            match stash.get(name) {
                Some(value) => out.push_str(&value_to_text(value)),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[name_len + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

fn token_len(s: &str) -> usize {
    s.find(|c: char| matches!(c, '{' | '}' | '"') || c.is_whitespace())
        .unwrap_or(s.len())
}
