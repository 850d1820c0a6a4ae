//! In-memory store and search engine for tests and single-process use.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::product::ProductId;
use crate::search::{
    FacetField, FacetFieldValue, SearchCriteria, SearchDocument, SortOrderConfig,
    SortOrderDirection,
};

use super::{
    DataPoolError, FullTextQuery, KeyValueStore, PageBounds, SearchEngine, SearchEngineResponse,
};

/// Thread-safe in-memory key-value store.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn set(&self, key: &str, value: &str) -> Result<(), DataPoolError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| DataPoolError::LockPoisoned("set"))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String, DataPoolError> {
        let data = self
            .data
            .read()
            .map_err(|_| DataPoolError::LockPoisoned("get"))?;
        data.get(key)
            .cloned()
            .ok_or_else(|| DataPoolError::KeyNotFound(key.to_string()))
    }

    fn multi_get(&self, keys: &[String]) -> Result<BTreeMap<String, String>, DataPoolError> {
        let data = self
            .data
            .read()
            .map_err(|_| DataPoolError::LockPoisoned("multi_get"))?;
        Ok(keys
            .iter()
            .filter_map(|key| data.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    fn has(&self, key: &str) -> Result<bool, DataPoolError> {
        let data = self
            .data
            .read()
            .map_err(|_| DataPoolError::LockPoisoned("has"))?;
        Ok(data.contains_key(key))
    }
}

/// In-memory search engine evaluating criteria trees directly against the
/// stored documents.
#[derive(Clone, Default)]
pub struct InMemorySearchEngine {
    documents: Arc<RwLock<Vec<SearchDocument>>>,
}

impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_ids(documents: Vec<&SearchDocument>, sort_order: &SortOrderConfig) -> Vec<ProductId> {
        let mut documents = documents;
        documents.sort_by(|a, b| {
            let left = first_value(a, &sort_order.attribute_code);
            let right = first_value(b, &sort_order.attribute_code);
            let ordering = compare_values(left, right);
            match sort_order.direction {
                SortOrderDirection::Asc => ordering,
                SortOrderDirection::Desc => ordering.reverse(),
            }
        });
        documents.iter().map(|d| d.product_id().clone()).collect()
    }

    fn page<T>(items: Vec<T>, page: PageBounds) -> Vec<T> {
        let skip = page.page_size * page.page_number.saturating_sub(1);
        items.into_iter().skip(skip).take(page.page_size).collect()
    }

    fn facet_counts(documents: &[&SearchDocument], facet_codes: &[String]) -> Vec<FacetField> {
        facet_codes
            .iter()
            .map(|code| {
                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for document in documents {
                    for value in document.fields().values(code).unwrap_or(&[]) {
                        *counts.entry(value).or_insert(0) += 1;
                    }
                }
                FacetField::new(
                    code.clone(),
                    counts
                        .into_iter()
                        .map(|(value, count)| FacetFieldValue::new(value, count))
                        .collect(),
                )
            })
            .collect()
    }

    fn matches_filters(document: &SearchDocument, filters: &BTreeMap<String, Vec<String>>) -> bool {
        filters.iter().all(|(code, selected)| {
            let values = document.fields().values(code).unwrap_or(&[]);
            selected.iter().any(|wanted| values.contains(wanted))
        })
    }

    fn matches_text(document: &SearchDocument, text: &str) -> bool {
        let needle = text.to_lowercase();
        document
            .fields()
            .iter()
            .any(|(_, values)| values.iter().any(|v| v.to_lowercase().contains(&needle)))
    }
}

fn first_value<'a>(document: &'a SearchDocument, code: &str) -> Option<&'a str> {
    document
        .fields()
        .values(code)
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Numeric comparison when both sides parse, lexicographic otherwise.
/// Documents without the sort attribute order last.
fn compare_values(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => match (l.parse::<f64>(), r.parse::<f64>()) {
            (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
            _ => l.cmp(r),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl SearchEngine for InMemorySearchEngine {
    fn add_document(&self, document: SearchDocument) -> Result<(), DataPoolError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DataPoolError::LockPoisoned("add_document"))?;
        documents.retain(|existing| {
            existing.context_id() != document.context_id()
                || existing.product_id() != document.product_id()
        });
        documents.push(document);
        Ok(())
    }

    fn query(
        &self,
        criteria: &SearchCriteria,
        context_id: &str,
        sort_order: &SortOrderConfig,
        page: PageBounds,
    ) -> Result<Vec<ProductId>, DataPoolError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DataPoolError::LockPoisoned("query"))?;
        let matching: Vec<&SearchDocument> = documents
            .iter()
            .filter(|d| d.context_id() == context_id && criteria.matches(d.fields()))
            .collect();
        Ok(Self::page(Self::sorted_ids(matching, sort_order), page))
    }

    fn query_full_text(
        &self,
        query: &FullTextQuery<'_>,
        context_id: &str,
        sort_order: &SortOrderConfig,
    ) -> Result<SearchEngineResponse, DataPoolError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DataPoolError::LockPoisoned("query_full_text"))?;
        let matching: Vec<&SearchDocument> = documents
            .iter()
            .filter(|d| {
                d.context_id() == context_id
                    && Self::matches_text(d, query.text)
                    && Self::matches_filters(d, query.filters)
            })
            .collect();

        let facet_fields = Self::facet_counts(&matching, query.facet_codes);
        let product_ids = Self::page(Self::sorted_ids(matching, sort_order), query.page);

        Ok(SearchEngineResponse {
            product_ids,
            facet_fields,
        })
    }
}
