//! Product model - the domain entities that get projected.
//!
//! Products are plain serializable value objects: they travel through the
//! queue as message payloads and are reconstructed during projection and
//! replay. A product carries its raw context data (not a built context), so
//! the projector can rebuild the exact context it was imported under.

mod attributes;
mod collector;
mod search_document_builder;

pub use attributes::ProductAttributes;
pub use collector::{
    AttributeValueCollector, AttributeValueCollectorLocator, ConfigurableAttributeValueCollector,
    DefaultAttributeValueCollector,
};
pub use search_document_builder::ProductSearchDocumentBuilder;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::ContextData;

/// Opaque product identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directly sellable product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleProduct {
    id: ProductId,
    tax_class: String,
    attributes: ProductAttributes,
    context_data: ContextData,
}

impl SimpleProduct {
    pub fn new(
        id: ProductId,
        tax_class: impl Into<String>,
        attributes: ProductAttributes,
        context_data: ContextData,
    ) -> Self {
        SimpleProduct {
            id,
            tax_class: tax_class.into(),
            attributes,
            context_data,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn tax_class(&self) -> &str {
        &self.tax_class
    }

    pub fn attributes(&self) -> &ProductAttributes {
        &self.attributes
    }

    pub fn context_data(&self) -> &ContextData {
        &self.context_data
    }
}

/// A product with variants (e.g. one shoe model in several sizes).
///
/// The configurable product has its own attributes; the variation attributes
/// name the axes along which the associated simple products differ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigurableProduct {
    product: SimpleProduct,
    variation_attributes: Vec<String>,
    associated_products: Vec<SimpleProduct>,
}

impl ConfigurableProduct {
    pub fn new(
        product: SimpleProduct,
        variation_attributes: Vec<String>,
        associated_products: Vec<SimpleProduct>,
    ) -> Self {
        ConfigurableProduct {
            product,
            variation_attributes,
            associated_products,
        }
    }

    pub fn variation_attributes(&self) -> &[String] {
        &self.variation_attributes
    }

    pub fn associated_products(&self) -> &[SimpleProduct] {
        &self.associated_products
    }
}

/// A product listing page definition (url key + listing attributes).
///
/// Listings are projected like products: their snippets (title, meta) are
/// rendered per context and cached under keys derived from the url key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    url_key: String,
    attributes: ProductAttributes,
    context_data: ContextData,
}

impl ProductListing {
    pub fn new(
        url_key: impl Into<String>,
        attributes: ProductAttributes,
        context_data: ContextData,
    ) -> Self {
        ProductListing {
            url_key: url_key.into(),
            attributes,
            context_data,
        }
    }

    pub fn url_key(&self) -> &str {
        &self.url_key
    }

    pub fn attributes(&self) -> &ProductAttributes {
        &self.attributes
    }

    pub fn context_data(&self) -> &ContextData {
        &self.context_data
    }
}

/// The product kinds the engine projects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Product {
    Simple(SimpleProduct),
    Configurable(ConfigurableProduct),
}

impl Product {
    fn simple(&self) -> &SimpleProduct {
        match self {
            Product::Simple(product) => product,
            Product::Configurable(configurable) => &configurable.product,
        }
    }

    pub fn id(&self) -> &ProductId {
        self.simple().id()
    }

    pub fn tax_class(&self) -> &str {
        self.simple().tax_class()
    }

    pub fn attributes(&self) -> &ProductAttributes {
        self.simple().attributes()
    }

    pub fn context_data(&self) -> &ContextData {
        self.simple().context_data()
    }
}
