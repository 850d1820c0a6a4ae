//! Context decorators - each adds exactly one dimension on top of a wrapped
//! context without mutating it.
//!
//! Decorators resolve their dimension value once, at construction, from the
//! raw context source data. Composition order determines the id layout, so
//! the [`ContextBuilder`](super::ContextBuilder) always applies them in the
//! same order to keep ids deterministic.

use std::collections::BTreeMap;

use super::{codes, Context, ContextError};

/// Raw key → value source data a context is built from.
pub type ContextData = BTreeMap<String, String>;

/// Language code → locale table used when deriving the locale from a URL.
///
/// Request paths embed a two-letter language code as the second half of the
/// first path segment (`/ma_de/...` → `de`). Unknown codes fall back to the
/// configured default locale.
const LOCALE_MAP: &[(&str, &str)] = &[("de", "de_DE"), ("en", "en_US"), ("fr", "fr_FR")];

fn shared_value<'a>(inner: &'a dyn Context, own_code: &str, own_value: &'a str, code: &str) -> Result<&'a str, ContextError> {
    if code == own_code {
        Ok(own_value)
    } else {
        inner.value(code)
    }
}

fn shared_codes(inner: &dyn Context, own_code: &str) -> Vec<String> {
    let mut codes = inner.supported_codes();
    codes.push(own_code.to_string());
    codes
}

/// Adds the `website` dimension from the raw `website` key.
pub struct WebsiteContextDecorator {
    inner: Box<dyn Context>,
    website: String,
}

impl WebsiteContextDecorator {
    /// Wrap `inner` with the website taken from the source data.
    pub fn new(inner: Box<dyn Context>, data: &ContextData) -> Result<Self, ContextError> {
        let website = data
            .get(codes::WEBSITE)
            .cloned()
            .ok_or(ContextError::MissingSourceData {
                code: codes::WEBSITE,
                expected: "\"website\"",
            })?;
        Ok(WebsiteContextDecorator { inner, website })
    }
}

impl Context for WebsiteContextDecorator {
    fn id(&self) -> String {
        format!("{}_w:{}", self.inner.id(), self.website)
    }

    fn value(&self, code: &str) -> Result<&str, ContextError> {
        shared_value(self.inner.as_ref(), codes::WEBSITE, &self.website, code)
    }

    fn supported_codes(&self) -> Vec<String> {
        shared_codes(self.inner.as_ref(), codes::WEBSITE)
    }
}

/// Adds the `locale` dimension.
///
/// Resolution order: an explicit `locale` key wins, otherwise the locale is
/// derived from the `url` key's first path segment, otherwise construction
/// fails. Derivation that parses but yields an unknown language code falls
/// back to the default locale.
pub struct LocaleContextDecorator {
    inner: Box<dyn Context>,
    locale: String,
}

impl LocaleContextDecorator {
    pub fn new(
        inner: Box<dyn Context>,
        data: &ContextData,
        default_locale: &str,
    ) -> Result<Self, ContextError> {
        let locale = Self::determine_locale(data, default_locale)?;
        Ok(LocaleContextDecorator { inner, locale })
    }

    fn determine_locale(data: &ContextData, default_locale: &str) -> Result<String, ContextError> {
        if let Some(locale) = data.get(codes::LOCALE) {
            return Ok(locale.clone());
        }
        if let Some(url) = data.get("url") {
            return Ok(Self::locale_from_url(url)
                .unwrap_or(default_locale)
                .to_string());
        }
        Err(ContextError::MissingSourceData {
            code: codes::LOCALE,
            expected: "\"locale\" and \"url\"",
        })
    }

    /// Extract the language code from the first path segment of a URL.
    ///
    /// `http://example.com/ma_de/foo` → `de` → `de_DE`.
    fn locale_from_url(url: &str) -> Option<&'static str> {
        let path = url.splitn(4, '/').nth(3)?;
        let first_segment = path.split('/').next()?;
        let language = first_segment.split('_').nth(1)?;
        LOCALE_MAP
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, locale)| *locale)
    }
}

impl Context for LocaleContextDecorator {
    fn id(&self) -> String {
        format!("{}_l:{}", self.inner.id(), self.locale)
    }

    fn value(&self, code: &str) -> Result<&str, ContextError> {
        shared_value(self.inner.as_ref(), codes::LOCALE, &self.locale, code)
    }

    fn supported_codes(&self) -> Vec<String> {
        shared_codes(self.inner.as_ref(), codes::LOCALE)
    }
}
