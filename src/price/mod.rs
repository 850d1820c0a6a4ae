//! Price - minor-unit integer amounts.
//!
//! Prices are stored and indexed as integer fractions of the currency unit
//! (cents at the default two decimal places). Keeping the arithmetic in
//! integers makes derived fields like tax-inclusive prices reproducible on
//! replay.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A price in minor units (e.g. cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    fractions: i64,
}

impl Price {
    /// Number of decimal places a major unit is split into.
    pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

    pub const fn from_fractions(fractions: i64) -> Self {
        Price { fractions }
    }

    pub const fn fractions(&self) -> i64 {
        self.fractions
    }

    /// Multiply by a factor, rounding half away from zero.
    ///
    /// This is how tax rates are applied: `10000 * 1.19` is exactly `11900`,
    /// and fractional results land on the nearest cent.
    pub fn multiply_by(&self, factor: f64) -> Price {
        Price {
            fractions: (self.fractions as f64 * factor).round() as i64,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fractions)
    }
}
