//! Engine configuration, resolved once at startup.

use std::env;

const DEFAULT_LOCALE: &str = "de_DE";
const DEFAULT_TAXABLE_COUNTRIES: &[&str] = &["DE"];
const DEFAULT_INDEX_ATTRIBUTES: &[&str] = &["brand", "gender", "price", "created_at"];
const DEFAULT_PRICE_RANGE_STEP: i64 = 2000;
const DEFAULT_PRICE_RANGE_CEILING: i64 = 50000;

/// Everything the engine needs to know at construction time.
///
/// Each setting resolves with a fixed precedence: an explicit override set
/// on the builder wins, then the corresponding environment variable, then a
/// built-in default. Resolution happens once in [`ConfigBuilder::build`];
/// nothing reads the environment after that.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub default_locale: String,
    pub taxable_countries: Vec<String>,
    pub index_attribute_codes: Vec<String>,
    pub price_range_step: i64,
    pub price_range_ceiling: i64,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::default().build()
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    default_locale: Option<String>,
    taxable_countries: Option<Vec<String>>,
    index_attribute_codes: Option<Vec<String>>,
    price_range_step: Option<i64>,
    price_range_ceiling: Option<i64>,
}

impl ConfigBuilder {
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn taxable_countries(mut self, countries: Vec<String>) -> Self {
        self.taxable_countries = Some(countries);
        self
    }

    pub fn index_attribute_codes(mut self, codes: Vec<String>) -> Self {
        self.index_attribute_codes = Some(codes);
        self
    }

    pub fn price_range_step(mut self, step: i64) -> Self {
        self.price_range_step = Some(step);
        self
    }

    pub fn price_range_ceiling(mut self, ceiling: i64) -> Self {
        self.price_range_ceiling = Some(ceiling);
        self
    }

    pub fn build(self) -> Config {
        Config {
            default_locale: self
                .default_locale
                .or_else(|| env_string("ENGINE_DEFAULT_LOCALE"))
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            taxable_countries: self
                .taxable_countries
                .or_else(|| env_list("ENGINE_TAXABLE_COUNTRIES"))
                .unwrap_or_else(|| defaults(DEFAULT_TAXABLE_COUNTRIES)),
            index_attribute_codes: self
                .index_attribute_codes
                .or_else(|| env_list("ENGINE_INDEX_ATTRIBUTES"))
                .unwrap_or_else(|| defaults(DEFAULT_INDEX_ATTRIBUTES)),
            price_range_step: self
                .price_range_step
                .or_else(|| env_int("ENGINE_PRICE_RANGE_STEP"))
                .unwrap_or(DEFAULT_PRICE_RANGE_STEP),
            price_range_ceiling: self
                .price_range_ceiling
                .or_else(|| env_int("ENGINE_PRICE_RANGE_CEILING"))
                .unwrap_or(DEFAULT_PRICE_RANGE_CEILING),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_list(name: &str) -> Option<Vec<String>> {
    env_string(name).map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
}

fn env_int(name: &str) -> Option<i64> {
    env_string(name).and_then(|v| v.parse().ok())
}

fn defaults(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_apply_without_overrides() {
        let config = Config::default();
        assert_eq!(config.default_locale, "de_DE");
        assert_eq!(config.taxable_countries, vec!["DE".to_string()]);
        assert_eq!(config.price_range_step, 2000);
        assert_eq!(config.price_range_ceiling, 50000);
    }

    #[test]
    fn explicit_overrides_win() {
        let config = Config::builder()
            .default_locale("en_US")
            .taxable_countries(vec!["DE".to_string(), "FR".to_string()])
            .price_range_step(1000)
            .build();
        assert_eq!(config.default_locale, "en_US");
        assert_eq!(
            config.taxable_countries,
            vec!["DE".to_string(), "FR".to_string()]
        );
        assert_eq!(config.price_range_step, 1000);
        assert_eq!(config.price_range_ceiling, 50000);
    }
}
