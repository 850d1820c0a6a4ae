//! Product and listing projectors.

use std::sync::Arc;

use crate::context::ContextBuilder;
use crate::data_pool::DataPoolWriter;
use crate::product::ProductSearchDocumentBuilder;

use super::{ProjectionError, ProjectionSource, Projector, SnippetRendererCollection};

/// Projects a product: renders its snippets, aggregates its search document
/// and writes both through the data pool.
///
/// The product carries the raw context data it was imported under, so the
/// projector reconstructs the context here rather than receiving one. That
/// keeps replay self-contained: the event payload alone determines every key
/// and document the projection writes.
pub struct ProductProjector {
    renderers: SnippetRendererCollection,
    document_builder: Arc<ProductSearchDocumentBuilder>,
    context_builder: Arc<ContextBuilder>,
    writer: DataPoolWriter,
}

impl ProductProjector {
    pub fn new(
        renderers: SnippetRendererCollection,
        document_builder: Arc<ProductSearchDocumentBuilder>,
        context_builder: Arc<ContextBuilder>,
        writer: DataPoolWriter,
    ) -> Self {
        ProductProjector {
            renderers,
            document_builder,
            context_builder,
            writer,
        }
    }
}

impl Projector for ProductProjector {
    fn project(&self, source: &ProjectionSource) -> Result<(), ProjectionError> {
        let ProjectionSource::Product(product) = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "product",
                found: source.kind(),
            });
        };

        let context = self.context_builder.create_context(product.context_data())?;
        let snippets = self.renderers.render(source, context.as_ref())?;
        let document = self.document_builder.aggregate(source)?;

        self.writer.write_snippets(&snippets)?;
        self.writer.add_search_document(document)?;
        Ok(())
    }
}

/// Projects a product listing's snippets for the listing's own context.
pub struct ProductListingSnippetProjector {
    renderers: SnippetRendererCollection,
    context_builder: Arc<ContextBuilder>,
    writer: DataPoolWriter,
}

impl ProductListingSnippetProjector {
    pub fn new(
        renderers: SnippetRendererCollection,
        context_builder: Arc<ContextBuilder>,
        writer: DataPoolWriter,
    ) -> Self {
        ProductListingSnippetProjector {
            renderers,
            context_builder,
            writer,
        }
    }
}

impl Projector for ProductListingSnippetProjector {
    fn project(&self, source: &ProjectionSource) -> Result<(), ProjectionError> {
        let ProjectionSource::Listing(listing) = source else {
            return Err(ProjectionError::InvalidSourceType {
                expected: "listing",
                found: source.kind(),
            });
        };

        let context = self.context_builder.create_context(listing.context_data())?;
        let snippets = self.renderers.render(source, context.as_ref())?;
        self.writer.write_snippets(&snippets)?;
        Ok(())
    }
}
