//! Wire parameter mapping
//!
//! [`Parameters`] is the set of key/value pairs a method sends. Keys keep the
//! order in which the method declared them, so encoded requests are stable and
//! easy to read in logs.
//!
//! # Absent, empty, populated
//!
//! A field left unset is not written at all: [`Parameters::insert_optional`]
//! with `None` leaves the mapping untouched. A field set to an empty sequence
//! is written as `[]`. Operations on the remote side rely on that difference
//! ("absent" keeps the stored value, "empty" resets it), so nothing here ever
//! turns one into the other.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered parameter set of a single request
///
/// # Examples
///
/// ```rust
/// use botwire_core::Parameters;
///
/// let mut params = Parameters::new();
/// params.insert_optional("offset", Some(10));
/// params.insert_optional("limit", None::<i32>);
/// params.insert_optional("allowed_updates", Some(Vec::<String>::new()));
///
/// assert_eq!(params.len(), 2);
/// assert!(!params.contains("limit"));
/// assert_eq!(params.get("allowed_updates"), Some(&serde_json::json!([])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Write a required value under `key`
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Write `value` under `key` only when it is set
    pub fn insert_optional<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Raw wire value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read the value under `key` back into a typed field
    ///
    /// An absent key reads as `Ok(None)`. A present key whose value does not
    /// fit `T` is a `Deserialization` error naming the key.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::parse(format!("Invalid value for parameter '{}'", key), e)),
        }
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameter is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the set and return the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Parameters> for Value {
    fn from(params: Parameters) -> Self {
        Value::Object(params.0)
    }
}
