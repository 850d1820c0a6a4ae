//! Read façade exposed to content-delivery request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::Context;
use crate::product::ProductId;
use crate::search::{SearchCriteria, SortOrderConfig};

use super::{
    DataPoolError, FullTextQuery, KeyValueStore, PageBounds, SearchEngine, SearchEngineResponse,
};

/// Reads snippets and search results, addressed by the keys and criteria the
/// rest of the engine derives.
#[derive(Clone)]
pub struct DataPoolReader {
    store: Arc<dyn KeyValueStore>,
    search_engine: Arc<dyn SearchEngine>,
}

impl DataPoolReader {
    pub fn new(store: Arc<dyn KeyValueStore>, search_engine: Arc<dyn SearchEngine>) -> Self {
        DataPoolReader {
            store,
            search_engine,
        }
    }

    /// The snippet body stored under a key; `KeyNotFound` on a miss.
    pub fn get_snippet(&self, key: &str) -> Result<String, DataPoolError> {
        self.store.get(key)
    }

    /// Batch snippet read; missing keys are absent from the result.
    pub fn get_snippets(&self, keys: &[String]) -> Result<BTreeMap<String, String>, DataPoolError> {
        self.store.multi_get(keys)
    }

    /// Whether a snippet is stored under the key, without fetching its body.
    pub fn has_snippet(&self, key: &str) -> Result<bool, DataPoolError> {
        self.store.has(key)
    }

    /// Ordered product ids matching the criteria in the given context.
    pub fn product_ids_matching_criteria(
        &self,
        criteria: &SearchCriteria,
        context: &dyn Context,
        sort_order: &SortOrderConfig,
        page: PageBounds,
    ) -> Result<Vec<ProductId>, DataPoolError> {
        self.search_engine
            .query(criteria, &context.id(), sort_order, page)
    }

    /// Full-text search with facet counts in the given context.
    pub fn search_results_matching_string(
        &self,
        query: &FullTextQuery<'_>,
        context: &dyn Context,
        sort_order: &SortOrderConfig,
    ) -> Result<SearchEngineResponse, DataPoolError> {
        self.search_engine
            .query_full_text(query, &context.id(), sort_order)
    }
}
