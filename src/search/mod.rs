//! Search - criteria trees, search documents, facets and sort orders.
//!
//! The search side of the engine is built from small value types:
//!
//! - [`SearchCriteria`] - a tree of comparison predicates evaluated against
//!   a document's field collection
//! - [`SearchDocument`] - the per-entity, per-context set of indexable
//!   scalar fields
//! - [`FacetFilterRange`] / [`FacetFieldValue`] - discrete buckets and value
//!   counts for narrowing results
//! - [`SortOrderConfig`] - attribute + direction applied when returning
//!   matches
//!
//! Everything here is pure and side-effect free; the
//! [`data_pool`](crate::data_pool) module wires these types to an actual
//! search engine backend.

mod criteria;
mod document;
mod facet;
mod price_ranges;
mod sort;

pub use criteria::{Operation, SearchCriteria, SearchCriterion};
pub use document::{SearchDocument, SearchDocumentFieldCollection};
pub use facet::{FacetField, FacetFieldValue, FacetFilterRange};
pub use price_ranges::price_ranges;
pub use sort::{SortOrderConfig, SortOrderDirection};
