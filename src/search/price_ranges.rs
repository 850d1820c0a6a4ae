//! Price facet ladder - the fixed set of ranges used for price navigation.

use super::facet::FacetFilterRange;

/// Build the price range ladder for filter navigation.
///
/// The ladder is `(-inf, step-1]`, then contiguous fixed-width buckets
/// `[i, i+step-1]` from `step` up to (but excluding) `ceiling`, then
/// `[ceiling, +inf)`. `step` and `ceiling` are minor units (cents). The
/// result is recomputed on every call and is stable for identical inputs.
pub fn price_ranges(step: i64, ceiling: i64) -> Vec<FacetFilterRange> {
    let mut ranges = vec![FacetFilterRange::new(None, Some(step - 1))];
    let mut from = step;
    while from < ceiling {
        ranges.push(FacetFilterRange::new(Some(from), Some(from + step - 1)));
        from += step;
    }
    ranges.push(FacetFilterRange::new(Some(ceiling), None));
    ranges
}
