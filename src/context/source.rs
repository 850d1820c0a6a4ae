//! Enumerates every context that must be pre-rendered.

use super::builder::ContextBuilder;
use super::decorator::ContextData;
use super::{Context, ContextError};

/// The cross product of configured websites and locales at the current data
/// version.
///
/// Template-scoped content (page templates, listing chrome) has to exist for
/// every dimension combination the platform serves, so projectors iterate
/// this source when a template changes rather than waiting for requests to
/// arrive.
pub struct ContextSource {
    websites: Vec<String>,
    locales: Vec<String>,
}

impl ContextSource {
    pub fn new(websites: Vec<String>, locales: Vec<String>) -> Self {
        ContextSource { websites, locales }
    }

    /// Build one context per (website, locale) pair, in configuration order.
    pub fn all_contexts(
        &self,
        builder: &ContextBuilder,
    ) -> Result<Vec<Box<dyn Context>>, ContextError> {
        let mut contexts = Vec::with_capacity(self.websites.len() * self.locales.len());
        for website in &self.websites {
            for locale in &self.locales {
                let mut data = ContextData::new();
                data.insert("website".to_string(), website.clone());
                data.insert("locale".to_string(), locale.clone());
                contexts.push(builder.create_context(&data)?);
            }
        }
        Ok(contexts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DataVersion;

    #[test]
    fn yields_the_cross_product_of_websites_and_locales() {
        let source = ContextSource::new(
            vec!["ru".to_string(), "cy".to_string()],
            vec!["de_DE".to_string(), "en_US".to_string()],
        );
        let builder = ContextBuilder::new(DataVersion::new("7").unwrap(), "de_DE");

        let ids: Vec<String> = source
            .all_contexts(&builder)
            .unwrap()
            .iter()
            .map(|c| c.id())
            .collect();

        assert_eq!(
            ids,
            vec![
                "v:7_w:ru_l:de_DE",
                "v:7_w:ru_l:en_US",
                "v:7_w:cy_l:de_DE",
                "v:7_w:cy_l:en_US",
            ]
        );
    }

    #[test]
    fn empty_configuration_yields_no_contexts() {
        let source = ContextSource::new(vec![], vec!["de_DE".to_string()]);
        let builder = ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE");
        assert!(source.all_contexts(&builder).unwrap().is_empty());
    }
}
