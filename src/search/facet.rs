//! Facet value types - buckets and counts for narrowing search results.

use serde::{Deserialize, Serialize};

/// A numeric interval bucketing a continuous attribute (price).
///
/// Either bound may be unbounded. Bounds are inclusive and expressed in the
/// same minor-unit precision as stored prices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFilterRange {
    from: Option<i64>,
    to: Option<i64>,
}

impl FacetFilterRange {
    pub const fn new(from: Option<i64>, to: Option<i64>) -> Self {
        FacetFilterRange { from, to }
    }

    pub const fn from(&self) -> Option<i64> {
        self.from
    }

    pub const fn to(&self) -> Option<i64> {
        self.to
    }

    /// Whether the given amount falls inside this range.
    pub fn contains(&self, amount: i64) -> bool {
        self.from.map_or(true, |from| amount >= from)
            && self.to.map_or(true, |to| amount <= to)
    }
}

/// One observed facet value together with how many matches carry it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetFieldValue {
    pub value: String,
    pub count: usize,
}

impl FacetFieldValue {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        FacetFieldValue {
            value: value.into(),
            count,
        }
    }
}

/// All observed values of one facetted attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetField {
    pub code: String,
    pub values: Vec<FacetFieldValue>,
}

impl FacetField {
    pub fn new(code: impl Into<String>, values: Vec<FacetFieldValue>) -> Self {
        FacetField {
            code: code.into(),
            values,
        }
    }
}
