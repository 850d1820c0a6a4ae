//! Tax rates - an external rate provider keyed by website, tax class and
//! country.
//!
//! The engine never computes tax rules itself; it asks a [`TaxRateProvider`]
//! for the applicable rate and applies it to a minor-unit price. The
//! in-memory provider exists for tests and single-process deployments.

use std::collections::HashMap;
use std::fmt;

use crate::price::Price;

/// A tax rate as a percentage (19.0 means 19%).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaxRate {
    percent: f64,
}

impl TaxRate {
    pub const fn new(percent: f64) -> Self {
        TaxRate { percent }
    }

    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Apply this rate to a net price, yielding the gross price.
    pub fn apply_to(&self, price: Price) -> Price {
        price.multiply_by(1.0 + self.percent / 100.0)
    }
}

/// Identifies which tax rule applies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaxRateQuery {
    pub website: String,
    pub tax_class: String,
    pub country: String,
}

impl TaxRateQuery {
    pub fn new(
        website: impl Into<String>,
        tax_class: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        TaxRateQuery {
            website: website.into(),
            tax_class: tax_class.into(),
            country: country.into(),
        }
    }
}

/// Error type for tax rate lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxError {
    /// No rate is configured for the (website, tax class, country) triple.
    UnknownRate {
        website: String,
        tax_class: String,
        country: String,
    },
}

impl fmt::Display for TaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxError::UnknownRate {
                website,
                tax_class,
                country,
            } => write!(
                f,
                "no tax rate configured for website '{}', tax class '{}', country '{}'",
                website, tax_class, country
            ),
        }
    }
}

impl std::error::Error for TaxError {}

/// External collaborator resolving tax rates.
pub trait TaxRateProvider: Send + Sync {
    fn rate_for(&self, query: &TaxRateQuery) -> Result<TaxRate, TaxError>;
}

/// Fixed rate table, used by tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryTaxRateProvider {
    rates: HashMap<TaxRateQuery, TaxRate>,
}

impl InMemoryTaxRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, query: TaxRateQuery, rate: TaxRate) -> Self {
        self.rates.insert(query, rate);
        self
    }
}

impl TaxRateProvider for InMemoryTaxRateProvider {
    fn rate_for(&self, query: &TaxRateQuery) -> Result<TaxRate, TaxError> {
        self.rates
            .get(query)
            .copied()
            .ok_or_else(|| TaxError::UnknownRate {
                website: query.website.clone(),
                tax_class: query.tax_class.clone(),
                country: query.country.clone(),
            })
    }
}
