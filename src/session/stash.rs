//! Per-scenario key/value stash
//!
//! Values are arbitrary JSON so a step can stash anything a response carries
//! (ids, tokens, whole objects). Reserved keys are declared as typed
//! [`StashKey`] constants so callers reading them get a concrete type back.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::common::Result;

/// A stash key bound to the type stored under it
#[derive(Debug)]
pub struct StashKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StashKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Bearer token used to build the `Authorization` header
pub const AUTH_TOKEN: StashKey<String> = StashKey::new("authToken");

/// Key/value store threading values between the steps of one scenario
#[derive(Debug, Default, Clone)]
pub struct Stash {
    values: HashMap<String, Value>,
}

impl Stash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value; missing keys are `None`, never an error
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Read a typed key. A value of the wrong shape reads as `None`.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &StashKey<T>) -> Option<T> {
        self.values
            .get(key.name())
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Store a typed key
    pub fn set_typed<T: Serialize>(&mut self, key: &StashKey<T>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.values.insert(key.name().to_string(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

/// Render a stashed value as text for substitution into step strings
///
/// Strings are inserted without quotes; everything else uses its JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
