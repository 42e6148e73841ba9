use apibdd::steps::context;
use cucumber::given;

use super::check;
use crate::world::ApiWorld;

/// Sets the base URL that relative endpoints are resolved against.
///
/// # Examples
///
/// ```gherkin
/// Given I set base URL to "https://dummyjson.com"
/// ```
#[given(expr = "I set base URL to {string}")]
fn set_base_url(world: &mut ApiWorld, url: String) {
    world.api.set_base_url(url);
}

/// Logs in through the login endpoint and sends the returned token as a
/// bearer token on later requests. The login response is recorded, so its
/// status and body can be asserted.
///
/// # Examples
///
/// ```gherkin
/// Given I am logged in as "emilys" with password "emilyspass"
/// ```
#[given(expr = "I am logged in as {string} with password {string}")]
async fn logged_in_as(world: &mut ApiWorld, username: String, password: String) {
    let harness = world.harness;
    let login = &harness.config.login;
    check(
        context::login_as(
            &mut world.api,
            &mut world.record,
            login,
            &login.default_base_url,
            &username,
            &password,
        )
        .await,
    );
}

/// Sets the bearer token. Write the token as `{name}` to use a value stored
/// by an earlier step.
///
/// # Examples
///
/// ```gherkin
/// Given I set bearer token "myAuthToken123"
/// Given I set bearer token "{authToken}"
/// ```
#[given(expr = "I set bearer token {string}")]
fn set_bearer_token(world: &mut ApiWorld, token: String) {
    check(context::set_bearer_token(&mut world.api, &token));
}

/// Adds a header to every following request. `{name}` placeholders in the
/// value are replaced with stored values.
///
/// # Examples
///
/// ```gherkin
/// Given I set header "X-Request-Source" to "apibdd"
/// ```
#[given(expr = "I set header {string} to {string}")]
fn set_header(world: &mut ApiWorld, name: String, value: String) {
    context::set_header(&mut world.api, &name, &value);
}
