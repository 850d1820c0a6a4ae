//! Typed product attribute map.
//!
//! Attribute values arrive from catalog imports as arbitrary JSON, so the
//! map stores raw [`serde_json::Value`]s and exposes explicit accessors:
//! `has` for presence checks and `scalar_values` for the stringified scalar
//! view the search index consumes. Structured values (objects, arrays of
//! objects, nulls) are filtered out at that boundary and never reach a
//! search document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute code → one or many raw values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    attributes: BTreeMap<String, Vec<Value>>,
}

impl ProductAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute to a single value, replacing previous values.
    pub fn set(&mut self, code: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(code.into(), vec![value.into()]);
    }

    /// Set an attribute to many values, replacing previous values.
    pub fn set_all(&mut self, code: impl Into<String>, values: Vec<Value>) {
        self.attributes.insert(code.into(), values);
    }

    pub fn has(&self, code: &str) -> bool {
        self.attributes.contains_key(code)
    }

    /// All raw values of an attribute, empty if absent.
    pub fn raw_values(&self, code: &str) -> &[Value] {
        self.attributes.get(code).map_or(&[], Vec::as_slice)
    }

    /// The stringified scalar values of an attribute.
    ///
    /// Non-scalar values are dropped; an attribute whose values are all
    /// structured yields an empty list.
    pub fn scalar_values(&self, code: &str) -> Vec<String> {
        self.raw_values(code)
            .iter()
            .filter_map(scalar_to_string)
            .collect()
    }

    /// The first scalar value of an attribute, if any.
    pub fn first_scalar_value(&self, code: &str) -> Option<String> {
        self.raw_values(code).iter().find_map(scalar_to_string)
    }

    pub fn codes(&self) -> impl Iterator<Item = &String> {
        self.attributes.keys()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
