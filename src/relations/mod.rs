//! Related-product lookups built on the criteria engine.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::data_pool::{DataPoolError, DataPoolReader, PageBounds};
use crate::key::{SnippetKeyData, SnippetKeyError, SnippetKeyGenerator};
use crate::product::{Product, ProductId};
use crate::search::{SearchCriteria, SortOrderConfig};

const RELATED_PRODUCT_COUNT: usize = 5;

/// Error type for relation lookups.
#[derive(Debug)]
pub enum RelationsError {
    Key(SnippetKeyError),
    DataPool(DataPoolError),
    /// The stored product snippet did not decode.
    MalformedSnippet(String),
}

impl fmt::Display for RelationsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationsError::Key(e) => write!(f, "snippet key error: {}", e),
            RelationsError::DataPool(e) => write!(f, "data pool error: {}", e),
            RelationsError::MalformedSnippet(msg) => {
                write!(f, "malformed product snippet: {}", msg)
            }
        }
    }
}

impl std::error::Error for RelationsError {}

impl From<SnippetKeyError> for RelationsError {
    fn from(e: SnippetKeyError) -> Self {
        RelationsError::Key(e)
    }
}

impl From<DataPoolError> for RelationsError {
    fn from(e: DataPoolError) -> Self {
        RelationsError::DataPool(e)
    }
}

/// Finds products sharing a brand and gender with a given product.
///
/// Reads the product's own JSON snippet to learn its brand and gender, then
/// queries the search index for products matching both while excluding the
/// product itself. Gender is multi-valued (a unisex shoe carries two), so
/// the criteria expand each stored value into an Or of Equal leaves.
pub struct BrandAndGenderProductRelations {
    reader: DataPoolReader,
    product_json_key_generator: Arc<dyn SnippetKeyGenerator>,
}

impl BrandAndGenderProductRelations {
    pub fn new(
        reader: DataPoolReader,
        product_json_key_generator: Arc<dyn SnippetKeyGenerator>,
    ) -> Self {
        BrandAndGenderProductRelations {
            reader,
            product_json_key_generator,
        }
    }

    /// Up to five related product ids, oldest first.
    pub fn related_product_ids(
        &self,
        product_id: &ProductId,
        context: &dyn Context,
    ) -> Result<Vec<ProductId>, RelationsError> {
        let mut data = SnippetKeyData::new();
        data.insert("product_id".to_string(), product_id.to_string());
        let key = self
            .product_json_key_generator
            .key_for_context(context, &data)?;
        let body = self.reader.get_snippet(&key)?;
        let product: Product = serde_json::from_str(&body)
            .map_err(|e| RelationsError::MalformedSnippet(e.to_string()))?;

        let criteria = SearchCriteria::and(vec![
            SearchCriteria::any_of("brand", &product.attributes().scalar_values("brand")),
            SearchCriteria::any_of("gender", &product.attributes().scalar_values("gender")),
            SearchCriteria::not_equal("product_id", product_id.as_str()),
        ]);

        Ok(self.reader.product_ids_matching_criteria(
            &criteria,
            context,
            &SortOrderConfig::asc("created_at"),
            PageBounds::new(RELATED_PRODUCT_COUNT, 1),
        )?)
    }
}
