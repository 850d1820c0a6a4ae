//! Aggregates a product's attributes into a search document.

use std::sync::Arc;

use crate::context::ContextBuilder;
use crate::price::Price;
use crate::projection::{ProjectionError, ProjectionSource};
use crate::search::{SearchDocument, SearchDocumentFieldCollection};
use crate::tax::{TaxRateProvider, TaxRateQuery};

use super::{AttributeValueCollectorLocator, Product};

const PRICE: &str = "price";
const PRODUCT_ID_FIELD: &str = "product_id";

/// Builds the [`SearchDocument`] for a product.
///
/// For each configured index attribute the per-kind value collector gathers
/// the scalar values present on the product. On top of that the builder adds
/// one derived `price_incl_tax_<country>` field per configured taxable
/// country (only when the product has a price at all) and always writes the
/// product's own id as an explicit field so criteria can exclude it
/// ("related products but not itself").
pub struct ProductSearchDocumentBuilder {
    index_attribute_codes: Vec<String>,
    collectors: AttributeValueCollectorLocator,
    taxable_countries: Vec<String>,
    tax_rate_provider: Arc<dyn TaxRateProvider>,
    context_builder: Arc<ContextBuilder>,
}

impl ProductSearchDocumentBuilder {
    pub fn new(
        index_attribute_codes: Vec<String>,
        taxable_countries: Vec<String>,
        tax_rate_provider: Arc<dyn TaxRateProvider>,
        context_builder: Arc<ContextBuilder>,
    ) -> Self {
        ProductSearchDocumentBuilder {
            index_attribute_codes,
            collectors: AttributeValueCollectorLocator::new(),
            taxable_countries,
            tax_rate_provider,
            context_builder,
        }
    }

    /// Aggregate a projection source into a search document.
    ///
    /// Fails fast when the source is not a product: that is a wiring bug,
    /// not a recoverable condition.
    pub fn aggregate(&self, source: &ProjectionSource) -> Result<SearchDocument, ProjectionError> {
        let ProjectionSource::Product(product) = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "product",
                found: source.kind(),
            });
        };
        self.create_search_document(product)
    }

    fn create_search_document(&self, product: &Product) -> Result<SearchDocument, ProjectionError> {
        let context = self
            .context_builder
            .create_context(product.context_data())
            .map_err(ProjectionError::Context)?;

        let mut fields = SearchDocumentFieldCollection::new();
        let collector = self.collectors.for_product(product);
        for code in &self.index_attribute_codes {
            fields.add(code.clone(), collector.values(product, code));
        }

        if let Some(price) = self.product_price(product) {
            let website = context
                .value("website")
                .map_err(ProjectionError::Context)?
                .to_string();
            for country in &self.taxable_countries {
                let query = TaxRateQuery::new(&website, product.tax_class(), country);
                let rate = self
                    .tax_rate_provider
                    .rate_for(&query)
                    .map_err(ProjectionError::Tax)?;
                fields.add(
                    format!("price_incl_tax_{}", country.to_lowercase()),
                    vec![rate.apply_to(price).to_string()],
                );
            }
        }

        fields.add(PRODUCT_ID_FIELD, vec![product.id().to_string()]);

        Ok(SearchDocument::new(fields, context.id(), product.id().clone()))
    }

    /// The effective price in minor units, honoring the special-price
    /// override the collector applies.
    fn product_price(&self, product: &Product) -> Option<Price> {
        if !product.attributes().has(PRICE) {
            return None;
        }
        let collector = self.collectors.for_product(product);
        let values = collector.values(product, PRICE);
        let amount = values.first()?.parse::<i64>().ok()?;
        Some(Price::from_fractions(amount))
    }
}
