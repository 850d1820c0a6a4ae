//! Turns catalog and page data into cached snippets and search documents.
//!
//! A projection source flows in from the domain event pipeline, renderers
//! produce snippets for the source's context, and the projector writes the
//! results through the data pool:
//!
//! ```text
//! ProjectionSource --> SnippetRendererCollection --> [Snippet]
//!        |                                              |
//!        +--> SearchDocumentBuilder --> SearchDocument  |
//!                                              |        |
//!                                              v        v
//!                                           DataPoolWriter
//! ```
//!
//! Projection is idempotent by key: re-running a projection for the same
//! source and data version rewrites the same keys with the same content,
//! which is what makes replay after a partial failure safe.

use std::fmt;

use crate::context::{Context, ContextError};
use crate::data_pool::DataPoolError;
use crate::key::SnippetKeyError;
use crate::product::{Product, ProductListing};
use crate::tax::TaxError;

mod product;
mod renderers;
mod template;

pub use product::{ProductListingSnippetProjector, ProductProjector};
pub use renderers::{
    PageTemplateSnippetRenderer, ProductJsonSnippetRenderer, ProductListingTitleSnippetRenderer,
};
pub use template::TemplateProjector;

/// Error type for projection.
#[derive(Debug)]
pub enum ProjectionError {
    /// The projector was handed a source of the wrong kind. A wiring bug,
    /// not a recoverable condition.
    InvalidSourceType {
        expected: &'static str,
        found: &'static str,
    },
    Context(ContextError),
    Key(SnippetKeyError),
    Tax(TaxError),
    DataPool(DataPoolError),
    /// Rendering produced content that could not be serialized.
    Serialization(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidSourceType { expected, found } => {
                write!(f, "invalid projection source type: expected {}, got {}", expected, found)
            }
            ProjectionError::Context(e) => write!(f, "context error: {}", e),
            ProjectionError::Key(e) => write!(f, "snippet key error: {}", e),
            ProjectionError::Tax(e) => write!(f, "tax error: {}", e),
            ProjectionError::DataPool(e) => write!(f, "data pool error: {}", e),
            ProjectionError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ProjectionError {}

impl From<ContextError> for ProjectionError {
    fn from(e: ContextError) -> Self {
        ProjectionError::Context(e)
    }
}

impl From<SnippetKeyError> for ProjectionError {
    fn from(e: SnippetKeyError) -> Self {
        ProjectionError::Key(e)
    }
}

impl From<TaxError> for ProjectionError {
    fn from(e: TaxError) -> Self {
        ProjectionError::Tax(e)
    }
}

impl From<DataPoolError> for ProjectionError {
    fn from(e: DataPoolError) -> Self {
        ProjectionError::DataPool(e)
    }
}

impl From<serde_json::Error> for ProjectionError {
    fn from(e: serde_json::Error) -> Self {
        ProjectionError::Serialization(e.to_string())
    }
}

/// The data a projector works from.
///
/// Each projector accepts exactly one variant and fails fast on the rest.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionSource {
    Product(Product),
    Listing(ProductListing),
    PageTemplate { code: String, data: String },
}

impl ProjectionSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ProjectionSource::Product(_) => "product",
            ProjectionSource::Listing(_) => "listing",
            ProjectionSource::PageTemplate { .. } => "page template",
        }
    }
}

/// A rendered content fragment together with the key it is stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet {
    key: String,
    content: String,
}

impl Snippet {
    pub fn new(key: impl Into<String>, content: impl Into<String>) -> Self {
        Snippet {
            key: key.into(),
            content: content.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Produces the snippets for one content type from a source and a context.
///
/// Rendering is a black box to the pipeline: a renderer may emit HTML, JSON
/// or any other body, and may emit several snippets per call (a root snippet
/// plus nested fragments).
pub trait SnippetRenderer: Send + Sync {
    fn render(
        &self,
        source: &ProjectionSource,
        context: &dyn Context,
    ) -> Result<Vec<Snippet>, ProjectionError>;
}

/// An ordered set of renderers applied to the same source.
#[derive(Default)]
pub struct SnippetRendererCollection {
    renderers: Vec<Box<dyn SnippetRenderer>>,
}

impl SnippetRendererCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, renderer: Box<dyn SnippetRenderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    /// Render the source with every registered renderer, concatenating the
    /// resulting snippets in registration order.
    pub fn render(
        &self,
        source: &ProjectionSource,
        context: &dyn Context,
    ) -> Result<Vec<Snippet>, ProjectionError> {
        let mut snippets = Vec::new();
        for renderer in &self.renderers {
            snippets.extend(renderer.render(source, context)?);
        }
        Ok(snippets)
    }
}

/// Writes the projection of one source into the data pool.
pub trait Projector: Send + Sync {
    fn project(&self, source: &ProjectionSource) -> Result<(), ProjectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextBuilder, ContextData, DataVersion};

    struct StaticRenderer {
        snippet: Snippet,
    }

    impl SnippetRenderer for StaticRenderer {
        fn render(
            &self,
            _source: &ProjectionSource,
            _context: &dyn Context,
        ) -> Result<Vec<Snippet>, ProjectionError> {
            Ok(vec![self.snippet.clone()])
        }
    }

    fn template_source() -> ProjectionSource {
        ProjectionSource::PageTemplate {
            code: "home".to_string(),
            data: "<div/>".to_string(),
        }
    }

    #[test]
    fn collection_concatenates_renderer_output_in_registration_order() {
        let collection = SnippetRendererCollection::new()
            .add(Box::new(StaticRenderer {
                snippet: Snippet::new("a", "1"),
            }))
            .add(Box::new(StaticRenderer {
                snippet: Snippet::new("b", "2"),
            }));

        let data: ContextData = [
            ("website".to_string(), "ru".to_string()),
            ("locale".to_string(), "de_DE".to_string()),
        ]
        .into();
        let context = ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE")
            .create_context(&data)
            .unwrap();

        let snippets = collection.render(&template_source(), context.as_ref()).unwrap();
        assert_eq!(
            snippets,
            vec![Snippet::new("a", "1"), Snippet::new("b", "2")]
        );
    }

    #[test]
    fn source_kinds_name_the_variant() {
        assert_eq!(template_source().kind(), "page template");
    }
}
