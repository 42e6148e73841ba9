use apibdd::steps::assertions;
use apibdd::steps::table::column_pairs;
use cucumber::gherkin::Step;
use cucumber::then;

use super::{check, docstring, table_rows};
use crate::world::ApiWorld;

/// Checks the status code of the last response.
///
/// # Examples
///
/// ```gherkin
/// Then the response status code should be 200
/// ```
#[then(expr = "the response status code should be {int}")]
fn status_code(world: &mut ApiWorld, code: u16) {
    check(assertions::assert_status(&world.record, code));
}

/// Validates the response body against a JSON Schema file under the schema
/// directory. The failure message lists every violated constraint.
///
/// # Examples
///
/// ```gherkin
/// Then the response should match schema from file "user.json"
/// ```
#[then(expr = "the response should match schema from file {string}")]
async fn matches_schema(world: &mut ApiWorld, file: String) {
    check(assertions::assert_matches_schema(&world.record, &world.harness.schemas_dir, &file).await);
}

/// Compares the whole response body with the doc string. Numbers compare by
/// value.
///
/// # Examples
///
/// ```gherkin
/// Then the response body should exactly match:
///   """
///   { "message": "Invalid credentials" }
///   """
/// ```
#[then("the response body should exactly match:")]
fn exactly_matches(world: &mut ApiWorld, step: &Step) {
    check(assertions::assert_exact_match(&world.record, docstring(step)));
}

/// Checks each top-level key of the doc string object against the response
/// body. Other keys in the body are ignored.
///
/// # Examples
///
/// ```gherkin
/// Then the response body should partially match:
///   """
///   { "id": 1, "firstName": "Emily" }
///   """
/// ```
#[then("the response body should partially match:")]
fn partially_matches(world: &mut ApiWorld, step: &Step) {
    check(assertions::assert_partial_match(&world.record, docstring(step)));
}

/// Checks fields by dot path. `true`/`false` and numbers in the value
/// column are compared as JSON booleans and numbers.
///
/// # Examples
///
/// ```gherkin
/// Then the response body should contain fields:
///   | field        | value   |
///   | firstName    | Emily   |
///   | address.city | Phoenix |
///   | age          | 28      |
/// ```
#[then("the response body should contain fields:")]
fn contains_fields(world: &mut ApiWorld, step: &Step) {
    let rows = check(column_pairs(table_rows(step), "field", "value"));
    check(assertions::assert_fields(&world.record, &rows));
}

/// Stores a response field for later steps, which refer to it as `{name}`.
///
/// # Examples
///
/// ```gherkin
/// Then I store the response field "accessToken" as "authToken"
/// ```
#[then(expr = "I store the response field {string} as {string}")]
fn store_field(world: &mut ApiWorld, field: String, name: String) {
    check(assertions::store_response_field(
        &world.record,
        &mut world.api,
        &field,
        &name,
    ));
}
