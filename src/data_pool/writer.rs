//! Write façade used by projectors.

use std::sync::Arc;

use crate::projection::Snippet;
use crate::search::SearchDocument;

use super::{DataPoolError, KeyValueStore, SearchEngine};

/// Writes snippets and search documents produced by projection.
///
/// Writes are last-writer-wins per key and atomic per individual key, not
/// across a batch: a crash mid-batch may leave a partial write. That is a
/// recognized limitation - recovery is re-projection from the event log,
/// which is safe because every write is idempotent by key.
#[derive(Clone)]
pub struct DataPoolWriter {
    store: Arc<dyn KeyValueStore>,
    search_engine: Arc<dyn SearchEngine>,
}

impl DataPoolWriter {
    pub fn new(store: Arc<dyn KeyValueStore>, search_engine: Arc<dyn SearchEngine>) -> Self {
        DataPoolWriter {
            store,
            search_engine,
        }
    }

    /// Write a batch of snippets, each under its own key.
    pub fn write_snippets(&self, snippets: &[Snippet]) -> Result<(), DataPoolError> {
        for snippet in snippets {
            self.store.set(snippet.key(), snippet.content())?;
        }
        Ok(())
    }

    /// Index a search document, replacing any prior document for the same
    /// (context, product id).
    pub fn add_search_document(&self, document: SearchDocument) -> Result<(), DataPoolError> {
        self.search_engine.add_document(document)
    }
}
