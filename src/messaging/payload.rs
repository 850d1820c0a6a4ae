//! Message payload validation.
//!
//! Payloads travel the wire as a tree whose every leaf is a string, integer,
//! float or boolean - never an object reference. The constructor enforces
//! this and names the offending path when it fails, so a bad producer learns
//! about its mistake synchronously instead of poisoning the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error raised when a payload carries a non-scalar leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPayload {
    /// `/`-separated path to the offending leaf, e.g. `/attributes/0/gender`.
    pub path: String,
    /// What was found there.
    pub found: &'static str,
}

impl fmt::Display for InvalidPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid message payload data type found at \"{}\": {} (must be string, int, float or boolean)",
            self.path, self.found
        )
    }
}

impl std::error::Error for InvalidPayload {}

/// A validated scalar-tree payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    value: Value,
}

impl MessagePayload {
    /// Validate and wrap a payload tree.
    pub fn new(value: Value) -> Result<Self, InvalidPayload> {
        validate(&value, "")?;
        Ok(MessagePayload { value })
    }

    /// Serialize any value into a validated payload.
    pub fn encode<T: Serialize>(payload: &T) -> Result<Self, InvalidPayload> {
        let value = serde_json::to_value(payload).map_err(|_| InvalidPayload {
            path: String::new(),
            found: "unserializable value",
        })?;
        Self::new(value)
    }

    /// Deserialize the payload into a typed value.
    pub fn decode<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.value.clone())
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

fn validate(value: &Value, path: &str) -> Result<(), InvalidPayload> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
        Value::Null => Err(InvalidPayload {
            path: leaf_path(path),
            found: "null",
        }),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                validate(item, &format!("{}/{}", path, index))?;
            }
            Ok(())
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                validate(item, &format!("{}/{}", path, key))?;
            }
            Ok(())
        }
    }
}

fn leaf_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}
