//! Snippet key generation - deterministic cache keys per content type.
//!
//! A snippet key is a pure function of (content-type code, context id,
//! ordered extra parameters). The same inputs always produce the same key,
//! which is what makes cached snippets addressable and re-projection
//! idempotent: writing the same derived content under the same key N times
//! is observably identical to writing it once.
//!
//! Product-scoped content bakes the product id into the key even though the
//! product id is not a context dimension - keys depend on both the context
//! and the explicit per-call parameters.
//!
//! ## Example
//!
//! ```
//! use projected_rust::{GenericSnippetKeyGenerator, SnippetKeyData, SnippetKeyGenerator};
//! use projected_rust::{ContextBuilder, DataVersion};
//!
//! let generator = GenericSnippetKeyGenerator::new("product_detail_view", &["product_id"]);
//! let builder = ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE");
//! let context = builder
//!     .create_context(&[("website".into(), "ru".into()), ("locale".into(), "de_DE".into())].into())
//!     .unwrap();
//!
//! let mut params = SnippetKeyData::new();
//! params.insert("product_id".to_string(), "118235-251".to_string());
//! let key = generator.key_for_context(context.as_ref(), &params).unwrap();
//! assert_eq!(key, "product_detail_view_118235-251_v:1_w:ru_l:de_DE");
//! ```

mod locator;

pub use locator::SnippetKeyGeneratorLocator;

use std::collections::BTreeMap;
use std::fmt;

use crate::context::Context;

/// Error type for key generation and generator lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetKeyError {
    /// A required extra key part was not supplied by the caller.
    MissingKeyPart {
        snippet_code: String,
        part: String,
    },
    /// No generator is registered for the snippet code.
    UnknownSnippetCode(String),
    /// A generator is already registered for the snippet code.
    DuplicateSnippetCode(String),
}

impl fmt::Display for SnippetKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetKeyError::MissingKeyPart { snippet_code, part } => write!(
                f,
                "missing key part '{}' for snippet code '{}'",
                part, snippet_code
            ),
            SnippetKeyError::UnknownSnippetCode(code) => {
                write!(f, "no snippet key generator registered for code '{}'", code)
            }
            SnippetKeyError::DuplicateSnippetCode(code) => write!(
                f,
                "a snippet key generator is already registered for code '{}'",
                code
            ),
        }
    }
}

impl std::error::Error for SnippetKeyError {}

/// Extra key parts passed per call (e.g. the product id).
pub type SnippetKeyData = BTreeMap<String, String>;

/// Derives the storage key for one content type.
pub trait SnippetKeyGenerator: Send + Sync {
    /// Derive the key for the given context and extra parameters.
    ///
    /// Must be pure: repeated calls with identical inputs return an
    /// identical string.
    fn key_for_context(
        &self,
        context: &dyn Context,
        data: &SnippetKeyData,
    ) -> Result<String, SnippetKeyError>;

    /// The content-type code this generator serves.
    fn snippet_code(&self) -> &str;
}

/// Key generator configured with a snippet code and an ordered list of
/// required extra parts.
///
/// The key layout is `<code>[_<part value>...]_<context id>`. Content types
/// without extra parts (page templates, listing chrome) configure an empty
/// part list and get purely context-scoped keys.
pub struct GenericSnippetKeyGenerator {
    snippet_code: String,
    required_parts: Vec<String>,
}

impl GenericSnippetKeyGenerator {
    pub fn new(snippet_code: impl Into<String>, required_parts: &[&str]) -> Self {
        GenericSnippetKeyGenerator {
            snippet_code: snippet_code.into(),
            required_parts: required_parts.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl SnippetKeyGenerator for GenericSnippetKeyGenerator {
    fn key_for_context(
        &self,
        context: &dyn Context,
        data: &SnippetKeyData,
    ) -> Result<String, SnippetKeyError> {
        let mut key = self.snippet_code.clone();
        for part in &self.required_parts {
            let value = data.get(part).ok_or_else(|| SnippetKeyError::MissingKeyPart {
                snippet_code: self.snippet_code.clone(),
                part: part.clone(),
            })?;
            key.push('_');
            key.push_str(value);
        }
        key.push('_');
        key.push_str(&context.id());
        Ok(key)
    }

    fn snippet_code(&self) -> &str {
        &self.snippet_code
    }
}
