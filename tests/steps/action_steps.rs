use apibdd::steps::table::column_pairs;
use apibdd::steps::{replace_variables, send_request, HttpMethod, RequestOptions};
use cucumber::gherkin::Step;
use cucumber::when;

use super::{check, docstring, table_rows};
use crate::world::ApiWorld;

async fn dispatch(
    world: &mut ApiWorld,
    method: &str,
    endpoint: &str,
    body: Option<&str>,
    params: Option<&[(String, String)]>,
) {
    let method: HttpMethod = check(method.parse());
    let endpoint = replace_variables(endpoint, world.api.stash());
    let body = body.map(|b| replace_variables(b, world.api.stash()));

    let mut options = RequestOptions::new(method, &endpoint);
    if let Some(body) = body.as_deref() {
        options = options.with_body(body);
    }
    if let Some(params) = params {
        options = options.with_params(params);
    }

    let response = check(send_request(&mut world.api, options).await);
    world.record.record(response);
}

/// Sends a request without a body. The method is one of GET, POST, PUT or
/// DELETE in any case. `{name}` placeholders in the path are replaced with
/// stored values.
///
/// # Examples
///
/// ```gherkin
/// When I send a GET request to "/users/1"
/// When I send a DELETE request to "/users/{userId}"
/// ```
#[when(expr = "I send a {word} request to {string}")]
async fn send(world: &mut ApiWorld, method: String, endpoint: String) {
    dispatch(world, &method, &endpoint, None, None).await;
}

/// Sends a request with the doc string as its JSON body.
///
/// # Examples
///
/// ```gherkin
/// When I send a POST request to "/users/add" with body:
///   """
///   { "firstName": "Ada", "lastName": "Lovelace" }
///   """
/// ```
#[when(expr = "I send a {word} request to {string} with body:")]
async fn send_with_body(world: &mut ApiWorld, step: &Step, method: String, endpoint: String) {
    dispatch(world, &method, &endpoint, Some(docstring(step)), None).await;
}

/// Sends a GET request with the table rows as query parameters.
///
/// # Examples
///
/// ```gherkin
/// When I send a GET request to "/users" with query parameters:
///   | name  | value |
///   | limit | 1     |
/// ```
#[when(expr = "I send a GET request to {string} with query parameters:")]
async fn send_with_query(world: &mut ApiWorld, step: &Step, endpoint: String) {
    let params = check(column_pairs(table_rows(step), "name", "value"));
    let params: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k, replace_variables(&v, world.api.stash())))
        .collect();
    dispatch(world, "GET", &endpoint, None, Some(&params)).await;
}
