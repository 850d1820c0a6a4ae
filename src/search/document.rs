//! Search documents - per-entity, per-context indexable fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::product::ProductId;

/// Ordered mapping from attribute code to its indexed string values.
///
/// Fields are multi-valued (a product can have several sizes) and hold only
/// stringified scalars; anything structured is filtered out before it gets
/// here. The explicit `has`/`values` accessors replace the ad-hoc raw map
/// shapes the rest of the engine would otherwise have to assume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocumentFieldCollection {
    fields: BTreeMap<String, Vec<String>>,
}

impl SearchDocumentFieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from (code, values) pairs. Test/fixture helper.
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        let fields = pairs
            .iter()
            .map(|(code, values)| {
                (
                    code.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect();
        SearchDocumentFieldCollection { fields }
    }

    /// Add a field, replacing any previous values under the same code.
    pub fn add(&mut self, code: impl Into<String>, values: Vec<String>) {
        self.fields.insert(code.into(), values);
    }

    pub fn has(&self, code: &str) -> bool {
        self.fields.contains_key(code)
    }

    pub fn values(&self, code: &str) -> Option<&[String]> {
        self.fields.get(code).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.fields.iter()
    }
}

/// The indexable representation of one entity in one context.
///
/// The context is carried as its deterministic id string: that is all the
/// search engine needs to scope queries, and it keeps documents plain
/// serializable values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    fields: SearchDocumentFieldCollection,
    context_id: String,
    product_id: ProductId,
}

impl SearchDocument {
    pub fn new(
        fields: SearchDocumentFieldCollection,
        context_id: impl Into<String>,
        product_id: ProductId,
    ) -> Self {
        SearchDocument {
            fields,
            context_id: context_id.into(),
            product_id,
        }
    }

    pub fn fields(&self) -> &SearchDocumentFieldCollection {
        &self.fields
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}
