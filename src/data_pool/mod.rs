//! Data pool - the single source of truth for snippets and search documents.
//!
//! The pool is a façade over two external stores: a key-value store holding
//! pre-rendered snippet bodies and a search engine holding
//! [`SearchDocument`]s. The engine core only specifies the contract it
//! requires of them; the in-memory implementations back tests and
//! single-process deployments.
//!
//! All writes are idempotent by key: writing the same derived content under
//! the same key N times is observably identical to writing it once, which is
//! what makes re-projection and replay safe without locking.

mod in_memory;
mod reader;
mod writer;

pub use in_memory::{InMemoryKeyValueStore, InMemorySearchEngine};
pub use reader::DataPoolReader;
pub use writer::DataPoolWriter;

use std::collections::BTreeMap;
use std::fmt;

use crate::product::ProductId;
use crate::search::{FacetField, SearchCriteria, SearchDocument, SortOrderConfig};

/// Error type for data pool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPoolError {
    /// No snippet is stored under the key.
    KeyNotFound(String),
    /// A store lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// The backend rejected or failed the operation.
    Backend(String),
}

impl fmt::Display for DataPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPoolError::KeyNotFound(key) => write!(f, "no snippet found for key '{}'", key),
            DataPoolError::LockPoisoned(operation) => {
                write!(f, "data pool lock poisoned during {}", operation)
            }
            DataPoolError::Backend(msg) => write!(f, "data pool backend error: {}", msg),
        }
    }
}

impl std::error::Error for DataPoolError {}

/// Contract required of the underlying key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Store a value, replacing any previous value under the key.
    fn set(&self, key: &str, value: &str) -> Result<(), DataPoolError>;

    /// Retrieve the value for a key; `KeyNotFound` on a miss.
    fn get(&self, key: &str) -> Result<String, DataPoolError>;

    /// Retrieve many keys at once; missing keys are simply absent from the
    /// result rather than an error.
    fn multi_get(&self, keys: &[String]) -> Result<BTreeMap<String, String>, DataPoolError>;

    fn has(&self, key: &str) -> Result<bool, DataPoolError>;
}

/// Paging for search queries. Page numbers start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageBounds {
    pub page_size: usize,
    pub page_number: usize,
}

impl PageBounds {
    pub const fn new(page_size: usize, page_number: usize) -> Self {
        PageBounds {
            page_size,
            page_number,
        }
    }
}

/// Full-text query parameters.
pub struct FullTextQuery<'a> {
    /// The search string, matched case-insensitively as a substring of any
    /// field value.
    pub text: &'a str,
    /// Selected facet filters: values are OR-ed within a code, codes are
    /// AND-ed against each other. Empty means no filtering.
    pub filters: &'a BTreeMap<String, Vec<String>>,
    /// Attribute codes to compute facet value counts for.
    pub facet_codes: &'a [String],
    pub page: PageBounds,
}

/// Matched ids plus facet counts for a full-text query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchEngineResponse {
    pub product_ids: Vec<ProductId>,
    pub facet_fields: Vec<FacetField>,
}

/// Contract required of the underlying search engine.
pub trait SearchEngine: Send + Sync {
    /// Index a document, replacing any prior document for the same
    /// (context, product id).
    fn add_document(&self, document: SearchDocument) -> Result<(), DataPoolError>;

    /// Ordered product ids matching the criteria within one context.
    fn query(
        &self,
        criteria: &SearchCriteria,
        context_id: &str,
        sort_order: &SortOrderConfig,
        page: PageBounds,
    ) -> Result<Vec<ProductId>, DataPoolError>;

    /// Full-text search within one context.
    fn query_full_text(
        &self,
        query: &FullTextQuery<'_>,
        context_id: &str,
        sort_order: &SortOrderConfig,
    ) -> Result<SearchEngineResponse, DataPoolError>;
}
