//! Assertions against the execution record
//!
//! Each check returns `Ok(())` or an assertion error carrying enough detail
//! to read the failure without rerunning the scenario. Problems with the
//! expectation itself (unparseable literal, missing schema file) are setup
//! errors instead.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::common::paths;
use crate::common::{Error, Result};
use crate::session::ApiContext;

use super::json::{coerce_expected, json_eq, lookup_path, strict_eq};
use super::record::ExecutionRecord;

/// Check the status code of the last response
pub fn assert_status(record: &ExecutionRecord, expected: u16) -> Result<()> {
    let actual = record.require_response()?.status();
    if actual != expected {
        return Err(Error::StatusMismatch { expected, actual });
    }
    Ok(())
}

/// One schema violation as reported by the validator
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolation {
    pub instance_path: String,
    pub schema_path: String,
    pub message: String,
}

/// Validate the response body against a JSON Schema document
///
/// An unparseable body is validated as `null`.
pub async fn assert_matches_schema(
    record: &ExecutionRecord,
    schema_root: &Path,
    schema_file: &str,
) -> Result<()> {
    let path = paths::schema_path(schema_root, schema_file);
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(Error::SchemaNotFound(schema_file.to_string()));
    }

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
    let schema: Value = serde_json::from_str(&content).map_err(|e| Error::InvalidSchema {
        path: schema_file.to_string(),
        reason: e.to_string(),
    })?;

    let body = record.response_body().cloned().unwrap_or(Value::Null);
    let violations = validate_schema(&schema, &body).map_err(|reason| Error::InvalidSchema {
        path: schema_file.to_string(),
        reason,
    })?;

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaViolation(serde_json::to_string(&violations)?))
    }
}

/// Compile `schema` and collect every violation in `instance`
///
/// Fails with the compiler's message if the schema itself is invalid.
pub fn validate_schema(
    schema: &Value,
    instance: &Value,
) -> std::result::Result<Vec<SchemaViolation>, String> {
    let validator = jsonschema::validator_for(schema).map_err(|e| e.to_string())?;

    Ok(validator
        .iter_errors(instance)
        .map(|error| SchemaViolation {
            instance_path: error.instance_path.to_string(),
            schema_path: error.schema_path.to_string(),
            message: error.to_string(),
        })
        .collect())
}

fn parse_expected(expected_json: &str) -> Result<Value> {
    serde_json::from_str(expected_json).map_err(Error::ExpectedJson)
}

/// The body must deep-equal the expected literal
pub fn assert_exact_match(record: &ExecutionRecord, expected_json: &str) -> Result<()> {
    let expected = parse_expected(expected_json)?;
    match record.response_body() {
        Some(actual) if json_eq(&expected, actual) => Ok(()),
        actual => Err(Error::body_mismatch(&expected, actual)),
    }
}

/// Every top-level key of the expected object must deep-equal the body's
///
/// Extra keys in the body are ignored.
pub fn assert_partial_match(record: &ExecutionRecord, expected_json: &str) -> Result<()> {
    let expected = parse_expected(expected_json)?;
    let Value::Object(expected_fields) = &expected else {
        return Err(Error::ExpectedJson(serde::de::Error::custom(
            "partial match expects a JSON object",
        )));
    };

    let body = record.response_body();
    for (key, expected_value) in expected_fields {
        let actual = body
            .and_then(|b| b.as_object())
            .and_then(|fields| fields.get(key))
            .ok_or_else(|| Error::MissingField(key.clone()))?;

        if !json_eq(expected_value, actual) {
            return Err(Error::field_mismatch(key, expected_value, actual));
        }
    }
    Ok(())
}

/// Check `(field path, expected text)` rows against the body
///
/// Expected text is coerced with [`coerce_expected`] and compared strictly.
pub fn assert_fields<S: AsRef<str>>(record: &ExecutionRecord, rows: &[(S, S)]) -> Result<()> {
    let body = record.response_body();
    for (field, value) in rows {
        let field = field.as_ref();
        let actual = lookup_path(body, field)?;
        let expected = coerce_expected(value.as_ref());
        if !strict_eq(&expected, actual) {
            return Err(Error::field_mismatch(field, &expected, actual));
        }
    }
    Ok(())
}

/// Copy a body field into the stash under `name`
pub fn store_response_field(
    record: &ExecutionRecord,
    ctx: &mut ApiContext,
    field: &str,
    name: &str,
) -> Result<()> {
    let value = lookup_path(record.response_body(), field)?.clone();
    ctx.store_value(name, value);
    Ok(())
}
