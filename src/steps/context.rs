//! Session setup steps: base URL, login, bearer token, headers

use serde_json::json;
use tracing::info;

use crate::common::config::LoginConfig;
use crate::common::{Error, Result};
use crate::session::stash::value_to_text;
use crate::session::{ApiContext, AUTH_TOKEN};

use super::dispatch::replace_variables;
use super::record::ExecutionRecord;

/// Log in with explicit credentials
///
/// Applies `default_base_url` when the scenario has no base URL yet. The
/// response is recorded so later steps can assert on it. A token in the
/// `accessToken` field is stashed under `authToken` and the transport is
/// rebuilt so it is sent from the next request on. Unlike the login
/// fixture, a non-JSON response body fails the step.
pub async fn login_as(
    ctx: &mut ApiContext,
    record: &mut ExecutionRecord,
    login: &LoginConfig,
    default_base_url: &str,
    username: &str,
    password: &str,
) -> Result<()> {
    if ctx.base_url().is_empty() {
        ctx.set_base_url(default_base_url);
    }

    let credentials = json!({ "username": username, "password": password });
    let response = ctx.post(&login.endpoint, Some(&credentials)).await?;
    record.record(response);
    let body = record.require_response()?.json()?;

    if let Some(token) = body.get("accessToken").filter(|t| !t.is_null()) {
        ctx.store_value(AUTH_TOKEN.name(), token.clone());
        ctx.initialize()?;
        info!(username, "Logged in");
    }
    Ok(())
}

/// Set the bearer token, literally or from the stash
///
/// A token written as `{name}` is read from the stash; a missing entry is
/// a setup error.
pub fn set_bearer_token(ctx: &mut ApiContext, token: &str) -> Result<()> {
    let actual = if token.starts_with('{') {
        let key: String = token.chars().filter(|c| *c != '{' && *c != '}').collect();
        ctx.get_value(&key)
            .map(value_to_text)
            .ok_or(Error::MissingStashValue(key))?
    } else {
        token.to_string()
    };

    ctx.set_auth_token(&actual);
    ctx.initialize()
}

/// Add a default header, resolving placeholders in its value
pub fn set_header(ctx: &mut ApiContext, name: &str, value: &str) {
    let value = replace_variables(value, ctx.stash());
    ctx.set_header(name, value);
}
