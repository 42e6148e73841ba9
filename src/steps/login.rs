//! `@Login` fixture: authenticate once per process, reuse the token after
//!
//! The fixture never fails a scenario. If authentication does not work the
//! scenario runs anonymously and its own assertions report the consequences
//! (typically a 401).

use std::sync::{Mutex, PoisonError};

use serde_json::json;
use tracing::{error, info};

use crate::common::config::LoginConfig;
use crate::session::ApiContext;

/// Process-wide cache of the fixture's token
#[derive(Debug, Default)]
pub struct LoginCache {
    token: Mutex<Option<String>>,
}

impl LoginCache {
    pub const fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    /// The cached token, if one was obtained and is non-empty
    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|t| !t.is_empty())
    }

    pub fn store(&self, token: String) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// What the fixture did for a scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A cached token was applied without a request
    Reused,
    /// A new token was obtained and cached
    Authenticated,
    /// The login endpoint answered with a non-success status
    Rejected(u16),
    /// The login response carried no usable token
    NoToken,
    /// The request failed or the body was unreadable
    Failed(String),
}

/// Run the fixture against a scenario's context
pub async fn login_fixture(
    ctx: &mut ApiContext,
    cache: &LoginCache,
    login: &LoginConfig,
) -> LoginOutcome {
    if let Some(token) = cache.token() {
        ctx.set_auth_token(&token);
        return LoginOutcome::Reused;
    }

    if ctx.base_url().is_empty() {
        ctx.set_base_url(login.default_base_url.clone());
    }

    let credentials = json!({
        "username": login.username,
        "password": login.password,
    });

    let response = match ctx.post(&login.endpoint, Some(&credentials)).await {
        Ok(response) => response,
        Err(e) => {
            error!("Authentication error: {}", e);
            return LoginOutcome::Failed(e.to_string());
        }
    };

    if !response.ok() {
        error!("Authentication failed: {}", response.status());
        return LoginOutcome::Rejected(response.status());
    }

    let body = match response.json() {
        Ok(body) => body,
        Err(e) => {
            error!("Authentication error: {}", e);
            return LoginOutcome::Failed(e.to_string());
        }
    };

    match body.get("accessToken").and_then(|t| t.as_str()) {
        Some(token) if !token.is_empty() => {
            cache.store(token.to_string());
            ctx.set_auth_token(token);
            info!("Authentication successful");
            LoginOutcome::Authenticated
        }
        _ => LoginOutcome::NoToken,
    }
}
