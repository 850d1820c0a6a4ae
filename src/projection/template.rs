//! Page template projector.

use std::sync::Arc;

use crate::context::{ContextBuilder, ContextSource};
use crate::data_pool::DataPoolWriter;

use super::{ProjectionError, ProjectionSource, Projector, SnippetRendererCollection};

/// Projects template-scoped content for every context the platform serves.
///
/// Templates carry no context data of their own, so a template change has to
/// be re-rendered for the whole cross product of configured websites and
/// locales. The context source supplies that enumeration.
pub struct TemplateProjector {
    renderers: SnippetRendererCollection,
    context_source: ContextSource,
    context_builder: Arc<ContextBuilder>,
    writer: DataPoolWriter,
}

impl TemplateProjector {
    pub fn new(
        renderers: SnippetRendererCollection,
        context_source: ContextSource,
        context_builder: Arc<ContextBuilder>,
        writer: DataPoolWriter,
    ) -> Self {
        TemplateProjector {
            renderers,
            context_source,
            context_builder,
            writer,
        }
    }
}

impl Projector for TemplateProjector {
    fn project(&self, source: &ProjectionSource) -> Result<(), ProjectionError> {
        if !matches!(source, ProjectionSource::PageTemplate { .. }) {
            return Err(ProjectionError::InvalidSourceType {
                expected: "page template",
                found: source.kind(),
            });
        }

        for context in self.context_source.all_contexts(self.context_builder.as_ref())? {
            let snippets = self.renderers.render(source, context.as_ref())?;
            self.writer.write_snippets(&snippets)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DataVersion;
    use crate::data_pool::{DataPoolReader, InMemoryKeyValueStore, InMemorySearchEngine, KeyValueStore};
    use crate::key::GenericSnippetKeyGenerator;
    use crate::projection::PageTemplateSnippetRenderer;

    #[test]
    fn template_is_written_once_per_served_context() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let engine = Arc::new(InMemorySearchEngine::new());
        let context_builder = Arc::new(ContextBuilder::new(DataVersion::new("2").unwrap(), "de_DE"));
        let renderers = SnippetRendererCollection::new().add(Box::new(
            PageTemplateSnippetRenderer::new(Arc::new(GenericSnippetKeyGenerator::new(
                "product_listing_template",
                &[],
            ))),
        ));
        let projector = TemplateProjector::new(
            renderers,
            ContextSource::new(
                vec!["ru".to_string(), "cy".to_string()],
                vec!["de_DE".to_string()],
            ),
            context_builder,
            DataPoolWriter::new(
                Arc::clone(&store) as Arc<dyn KeyValueStore>,
                Arc::clone(&engine) as _,
            ),
        );

        projector
            .project(&ProjectionSource::PageTemplate {
                code: "product_listing_template".to_string(),
                data: "<main/>".to_string(),
            })
            .unwrap();

        let reader = DataPoolReader::new(store as Arc<dyn KeyValueStore>, engine as _);
        assert_eq!(
            reader
                .get_snippet("product_listing_template_v:2_w:ru_l:de_DE")
                .unwrap(),
            "<main/>"
        );
        assert_eq!(
            reader
                .get_snippet("product_listing_template_v:2_w:cy_l:de_DE")
                .unwrap(),
            "<main/>"
        );
    }

    #[test]
    fn non_template_sources_are_rejected() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let engine = Arc::new(InMemorySearchEngine::new());
        let projector = TemplateProjector::new(
            SnippetRendererCollection::new(),
            ContextSource::new(vec![], vec![]),
            Arc::new(ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE")),
            DataPoolWriter::new(store as Arc<dyn KeyValueStore>, engine as _),
        );

        let source = ProjectionSource::Product(crate::product::Product::Simple(
            crate::product::SimpleProduct::new(
                crate::product::ProductId::new("1"),
                "none",
                crate::product::ProductAttributes::new(),
                crate::context::ContextData::new(),
            ),
        ));
        assert!(matches!(
            projector.project(&source),
            Err(ProjectionError::InvalidSourceType { expected: "page template", .. })
        ));
    }
}
