//! Attribute value collection strategies per product kind.
//!
//! Different product kinds compute index attribute values differently: a
//! simple product's values come straight off its attribute map, while a
//! configurable product unions the values of its associated variants along
//! the variation axes (the shoe model is searchable under every size any
//! variant has). The locator resolves the strategy once per product, by
//! kind, instead of scattering kind checks through the document builder.

use super::{Product, ProductAttributes};

/// Canonical price field and its override.
const PRICE: &str = "price";
const SPECIAL_PRICE: &str = "special_price";

/// Collects the indexable values of one attribute for one product.
pub trait AttributeValueCollector: Send + Sync {
    fn values(&self, product: &Product, code: &str) -> Vec<String>;
}

/// Collects values straight off the product's own attribute map.
///
/// The canonical `price` field is populated from `special_price` when the
/// product carries one - the discounted price is the one customers search
/// and sort by.
#[derive(Default)]
pub struct DefaultAttributeValueCollector;

impl DefaultAttributeValueCollector {
    fn effective_code<'a>(attributes: &ProductAttributes, code: &'a str) -> &'a str {
        if code == PRICE && attributes.has(SPECIAL_PRICE) {
            SPECIAL_PRICE
        } else {
            code
        }
    }
}

impl AttributeValueCollector for DefaultAttributeValueCollector {
    fn values(&self, product: &Product, code: &str) -> Vec<String> {
        let attributes = product.attributes();
        attributes.scalar_values(Self::effective_code(attributes, code))
    }
}

/// Collects values for configurable products.
///
/// For a variation attribute the values of all associated products are
/// collected (deduplicated, in first-seen order); other attributes fall
/// back to the default behavior.
#[derive(Default)]
pub struct ConfigurableAttributeValueCollector;

impl AttributeValueCollector for ConfigurableAttributeValueCollector {
    fn values(&self, product: &Product, code: &str) -> Vec<String> {
        let Product::Configurable(configurable) = product else {
            return DefaultAttributeValueCollector.values(product, code);
        };
        if !configurable.variation_attributes().contains(&code.to_string()) {
            return DefaultAttributeValueCollector.values(product, code);
        }
        let mut values = Vec::new();
        for associated in configurable.associated_products() {
            for value in associated.attributes().scalar_values(code) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }
        values
    }
}

/// Resolves the collector for a product by its kind.
#[derive(Default)]
pub struct AttributeValueCollectorLocator {
    default: DefaultAttributeValueCollector,
    configurable: ConfigurableAttributeValueCollector,
}

impl AttributeValueCollectorLocator {
    pub fn new() -> Self {
        AttributeValueCollectorLocator {
            default: DefaultAttributeValueCollector,
            configurable: ConfigurableAttributeValueCollector,
        }
    }

    pub fn for_product(&self, product: &Product) -> &dyn AttributeValueCollector {
        match product {
            Product::Simple(_) => &self.default,
            Product::Configurable(_) => &self.configurable,
        }
    }
}
