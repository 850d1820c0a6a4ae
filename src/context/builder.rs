//! Builds decorated contexts from raw source data.

use super::decorator::{ContextData, LocaleContextDecorator, WebsiteContextDecorator};
use super::{Context, ContextError, DataVersion, VersionedContext};

/// Constructs a [`Context`] from a raw key → value map.
///
/// The builder always layers the same decorator chain in the same order
/// (version base, then website, then locale), so identical source data
/// always yields an identical context id. The data version is fixed at
/// construction; raw data never overrides it, because the version is owned
/// by the upstream data import rather than by any single request.
pub struct ContextBuilder {
    version: DataVersion,
    default_locale: String,
}

impl ContextBuilder {
    pub fn new(version: DataVersion, default_locale: impl Into<String>) -> Self {
        ContextBuilder {
            version,
            default_locale: default_locale.into(),
        }
    }

    /// Create a context from raw source data.
    ///
    /// Fails when a decorator cannot determine its dimension from the data
    /// (for example neither `locale` nor `url` is present).
    pub fn create_context(&self, data: &ContextData) -> Result<Box<dyn Context>, ContextError> {
        let base = VersionedContext::new(self.version.clone());
        let website = WebsiteContextDecorator::new(Box::new(base), data)?;
        let locale = LocaleContextDecorator::new(Box::new(website), data, &self.default_locale)?;
        Ok(Box::new(locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ContextBuilder {
        ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE")
    }

    fn data(pairs: &[(&str, &str)]) -> ContextData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn identical_source_data_yields_identical_ids() {
        let source = data(&[("website", "ru"), ("locale", "de_DE")]);
        let a = builder().create_context(&source).unwrap();
        let b = builder().create_context(&source).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn differing_dimension_values_yield_differing_ids() {
        let a = builder()
            .create_context(&data(&[("website", "ru"), ("locale", "de_DE")]))
            .unwrap();
        let b = builder()
            .create_context(&data(&[("website", "ru"), ("locale", "en_US")]))
            .unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn built_context_supports_all_three_dimensions() {
        let context = builder()
            .create_context(&data(&[("website", "ru"), ("locale", "de_DE")]))
            .unwrap();
        let mut codes = context.supported_codes();
        codes.sort();
        assert_eq!(codes, vec!["locale", "version", "website"]);
    }

    #[test]
    fn missing_website_fails_construction() {
        let result = builder().create_context(&data(&[("locale", "de_DE")]));
        assert!(matches!(
            result,
            Err(ContextError::MissingSourceData { code: "website", .. })
        ));
    }

    #[test]
    fn extra_keys_in_the_source_data_are_ignored() {
        let context = builder()
            .create_context(&data(&[
                ("website", "ru"),
                ("locale", "de_DE"),
                ("session", "abc"),
            ]))
            .unwrap();
        assert_eq!(context.id(), "v:1_w:ru_l:de_DE");
        assert!(context.value("session").is_err());
    }

    #[test]
    fn builder_data_version_is_visible_in_every_context() {
        let context = builder()
            .create_context(&data(&[("website", "cy"), ("locale", "en_US")]))
            .unwrap();
        assert_eq!(context.value("version").unwrap(), "1");
    }
}
