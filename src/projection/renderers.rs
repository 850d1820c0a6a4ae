//! Concrete snippet renderers.

use std::sync::Arc;

use crate::context::Context;
use crate::key::{SnippetKeyData, SnippetKeyGenerator};

use super::{ProjectionError, ProjectionSource, Snippet, SnippetRenderer};

/// Renders a product as a JSON snippet under a product-scoped key.
///
/// The body is the full serialized product, which downstream readers
/// (detail pages, relation lookups) deserialize back into a [`Product`].
///
/// [`Product`]: crate::product::Product
pub struct ProductJsonSnippetRenderer {
    key_generator: Arc<dyn SnippetKeyGenerator>,
}

impl ProductJsonSnippetRenderer {
    pub fn new(key_generator: Arc<dyn SnippetKeyGenerator>) -> Self {
        ProductJsonSnippetRenderer { key_generator }
    }
}

impl SnippetRenderer for ProductJsonSnippetRenderer {
    fn render(
        &self,
        source: &ProjectionSource,
        context: &dyn Context,
    ) -> Result<Vec<Snippet>, ProjectionError> {
        let ProjectionSource::Product(product) = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "product",
                found: source.kind(),
            });
        };
        let mut data = SnippetKeyData::new();
        data.insert("product_id".to_string(), product.id().to_string());
        let key = self.key_generator.key_for_context(context, &data)?;
        let content = serde_json::to_string(product)?;
        Ok(vec![Snippet::new(key, content)])
    }
}

/// Renders the title snippet for a product listing.
///
/// Uses the listing's `meta_title` attribute when present, the url key
/// otherwise.
pub struct ProductListingTitleSnippetRenderer {
    key_generator: Arc<dyn SnippetKeyGenerator>,
}

impl ProductListingTitleSnippetRenderer {
    pub fn new(key_generator: Arc<dyn SnippetKeyGenerator>) -> Self {
        ProductListingTitleSnippetRenderer { key_generator }
    }
}

impl SnippetRenderer for ProductListingTitleSnippetRenderer {
    fn render(
        &self,
        source: &ProjectionSource,
        context: &dyn Context,
    ) -> Result<Vec<Snippet>, ProjectionError> {
        let ProjectionSource::Listing(listing) = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "listing",
                found: source.kind(),
            });
        };
        let mut data = SnippetKeyData::new();
        data.insert("url_key".to_string(), listing.url_key().to_string());
        let key = self.key_generator.key_for_context(context, &data)?;
        let title = listing
            .attributes()
            .first_scalar_value("meta_title")
            .unwrap_or_else(|| listing.url_key().to_string());
        Ok(vec![Snippet::new(key, title)])
    }
}

/// Renders a page template's body under a purely context-scoped key.
///
/// Template content carries no extra key parts; one snippet per context is
/// written, and the template projector calls this once per served context.
pub struct PageTemplateSnippetRenderer {
    key_generator: Arc<dyn SnippetKeyGenerator>,
}

impl PageTemplateSnippetRenderer {
    pub fn new(key_generator: Arc<dyn SnippetKeyGenerator>) -> Self {
        PageTemplateSnippetRenderer { key_generator }
    }
}

impl SnippetRenderer for PageTemplateSnippetRenderer {
    fn render(
        &self,
        source: &ProjectionSource,
        context: &dyn Context,
    ) -> Result<Vec<Snippet>, ProjectionError> {
        let ProjectionSource::PageTemplate { data, .. } = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "page template",
                found: source.kind(),
            });
        };
        let key = self
            .key_generator
            .key_for_context(context, &SnippetKeyData::new())?;
        Ok(vec![Snippet::new(key, data.clone())])
    }
}
