//! Search criteria - a tree of comparison predicates.
//!
//! Leaves compare one field of a document against a literal; composites
//! combine children with AND or OR. Evaluation is a pure, left-to-right tree
//! walk with short-circuiting, which keeps results deterministic and cheap
//! to reason about in tests.
//!
//! ## Example
//!
//! ```
//! use projected_rust::{SearchCriteria, SearchDocumentFieldCollection};
//!
//! let criteria = SearchCriteria::and(vec![
//!     SearchCriteria::equal("brand", "Pooma"),
//!     SearchCriteria::not_equal("product_id", "118"),
//! ]);
//!
//! let fields = SearchDocumentFieldCollection::from_pairs(&[
//!     ("brand", &["Pooma"][..]),
//!     ("product_id", &["252"][..]),
//! ]);
//! assert!(criteria.matches(&fields));
//! ```

use serde::{Deserialize, Serialize};

use super::document::SearchDocumentFieldCollection;

/// Comparison operation of a leaf criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

/// A leaf predicate: one field compared against one literal value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchCriterion {
    pub field: String,
    pub value: String,
    pub operation: Operation,
}

impl SearchCriterion {
    pub fn new(field: impl Into<String>, value: impl Into<String>, operation: Operation) -> Self {
        SearchCriterion {
            field: field.into(),
            value: value.into(),
            operation,
        }
    }

    /// Evaluate this criterion against a document's fields.
    ///
    /// Fields are multi-valued: `Equal` is true if ANY value matches, while
    /// `NotEqual` is the negation over the whole list (true only if NO value
    /// matches). The numeric operations are true if ANY value compares;
    /// values that do not parse as numbers never match.
    pub fn matches(&self, fields: &SearchDocumentFieldCollection) -> bool {
        let values = fields.values(&self.field).unwrap_or(&[]);
        match self.operation {
            Operation::Equal => values.iter().any(|v| *v == self.value),
            Operation::NotEqual => !values.iter().any(|v| *v == self.value),
            Operation::GreaterThan => Self::any_numeric(values, &self.value, |a, b| a > b),
            Operation::LessThan => Self::any_numeric(values, &self.value, |a, b| a < b),
        }
    }

    fn any_numeric(values: &[String], literal: &str, compare: impl Fn(f64, f64) -> bool) -> bool {
        let Ok(literal) = literal.parse::<f64>() else {
            return false;
        };
        values
            .iter()
            .filter_map(|v| v.parse::<f64>().ok())
            .any(|v| compare(v, literal))
    }
}

/// A composable tree of search predicates.
///
/// Empty composites follow the identity-element convention: `And` of no
/// children is true, `Or` of no children is false.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchCriteria {
    Criterion(SearchCriterion),
    And(Vec<SearchCriteria>),
    Or(Vec<SearchCriteria>),
}

impl SearchCriteria {
    pub fn equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchCriteria::Criterion(SearchCriterion::new(field, value, Operation::Equal))
    }

    pub fn not_equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchCriteria::Criterion(SearchCriterion::new(field, value, Operation::NotEqual))
    }

    pub fn greater_than(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchCriteria::Criterion(SearchCriterion::new(field, value, Operation::GreaterThan))
    }

    pub fn less_than(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchCriteria::Criterion(SearchCriterion::new(field, value, Operation::LessThan))
    }

    pub fn and(children: Vec<SearchCriteria>) -> Self {
        SearchCriteria::And(children)
    }

    pub fn or(children: Vec<SearchCriteria>) -> Self {
        SearchCriteria::Or(children)
    }

    /// Build an equality criterion over one or many candidate values.
    ///
    /// A multi-valued candidate (e.g. `gender = [unisex, men]`) expands to
    /// an OR of per-value Equal criteria; a single value stays a plain leaf.
    pub fn any_of(field: impl Into<String>, values: &[String]) -> Self {
        let field = field.into();
        match values {
            [single] => SearchCriteria::equal(field, single.clone()),
            many => SearchCriteria::Or(
                many.iter()
                    .map(|value| SearchCriteria::equal(field.clone(), value.clone()))
                    .collect(),
            ),
        }
    }

    /// Evaluate the tree against a document's fields.
    ///
    /// Children are evaluated strictly left-to-right; AND short-circuits on
    /// the first false child and OR on the first true child.
    pub fn matches(&self, fields: &SearchDocumentFieldCollection) -> bool {
        self.evaluate(&mut |criterion| criterion.matches(fields))
    }

    /// Walk the tree with a custom leaf evaluator.
    ///
    /// Leaves are visited strictly left-to-right; AND stops at the first
    /// false child, OR at the first true child, so leaves past the deciding
    /// child are never evaluated.
    pub fn evaluate(&self, leaf: &mut impl FnMut(&SearchCriterion) -> bool) -> bool {
        match self {
            SearchCriteria::Criterion(criterion) => leaf(criterion),
            SearchCriteria::And(children) => {
                for child in children {
                    if !child.evaluate(&mut *leaf) {
                        return false;
                    }
                }
                true
            }
            SearchCriteria::Or(children) => {
                for child in children {
                    if child.evaluate(&mut *leaf) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &[&str])]) -> SearchDocumentFieldCollection {
        SearchDocumentFieldCollection::from_pairs(pairs)
    }

    #[test]
    fn equal_matches_if_any_value_matches() {
        let doc = fields(&[("gender", &["men", "unisex"])]);
        assert!(SearchCriteria::equal("gender", "men").matches(&doc));
        assert!(SearchCriteria::equal("gender", "unisex").matches(&doc));
        assert!(!SearchCriteria::equal("gender", "ladies").matches(&doc));
    }

    #[test]
    fn equal_on_a_missing_field_is_false() {
        let doc = fields(&[("brand", &["Pooma"])]);
        assert!(!SearchCriteria::equal("gender", "men").matches(&doc));
    }

    #[test]
    fn not_equal_negates_over_the_whole_value_list() {
        let both = fields(&[("gender", &["men", "unisex"])]);
        let unisex_only = fields(&[("gender", &["unisex"])]);

        assert!(!SearchCriteria::not_equal("gender", "men").matches(&both));
        assert!(SearchCriteria::not_equal("gender", "men").matches(&unisex_only));
    }

    #[test]
    fn not_equal_on_a_missing_field_is_true() {
        let doc = fields(&[("brand", &["Pooma"])]);
        assert!(SearchCriteria::not_equal("gender", "men").matches(&doc));
    }

    #[test]
    fn greater_than_matches_if_any_value_is_strictly_greater() {
        let doc = fields(&[("price", &["1000", "2500"])]);
        assert!(SearchCriteria::greater_than("price", "2000").matches(&doc));
        assert!(!SearchCriteria::greater_than("price", "2500").matches(&doc));
    }

    #[test]
    fn less_than_matches_if_any_value_is_strictly_less() {
        let doc = fields(&[("price", &["1000", "2500"])]);
        assert!(SearchCriteria::less_than("price", "1500").matches(&doc));
        assert!(!SearchCriteria::less_than("price", "1000").matches(&doc));
    }

    #[test]
    fn non_numeric_values_never_match_numeric_operations() {
        let doc = fields(&[("price", &["n/a"])]);
        assert!(!SearchCriteria::greater_than("price", "0").matches(&doc));
        assert!(!SearchCriteria::greater_than("size", "0").matches(&doc));
    }

    #[test]
    fn and_is_true_iff_all_children_are_true() {
        let doc = fields(&[("brand", &["Pooma"]), ("gender", &["men"]), ("price", &["900"])]);
        let all_true = SearchCriteria::and(vec![
            SearchCriteria::equal("brand", "Pooma"),
            SearchCriteria::equal("gender", "men"),
            SearchCriteria::greater_than("price", "100"),
        ]);
        let one_false = SearchCriteria::and(vec![
            SearchCriteria::equal("brand", "Pooma"),
            SearchCriteria::equal("gender", "ladies"),
            SearchCriteria::greater_than("price", "100"),
        ]);
        assert!(all_true.matches(&doc));
        assert!(!one_false.matches(&doc));
    }

    #[test]
    fn or_is_true_if_any_child_is_true() {
        let doc = fields(&[("gender", &["unisex"])]);
        let criteria = SearchCriteria::or(vec![
            SearchCriteria::equal("gender", "men"),
            SearchCriteria::equal("gender", "unisex"),
        ]);
        assert!(criteria.matches(&doc));
    }

    #[test]
    fn empty_and_is_true_and_empty_or_is_false() {
        let doc = fields(&[]);
        assert!(SearchCriteria::and(vec![]).matches(&doc));
        assert!(!SearchCriteria::or(vec![]).matches(&doc));
    }

    #[test]
    fn any_of_expands_multiple_values_to_an_or_of_equals() {
        let values = vec!["unisex".to_string(), "men".to_string()];
        let criteria = SearchCriteria::any_of("gender", &values);
        assert_eq!(
            criteria,
            SearchCriteria::Or(vec![
                SearchCriteria::equal("gender", "unisex"),
                SearchCriteria::equal("gender", "men"),
            ])
        );
    }

    #[test]
    fn any_of_keeps_a_single_value_as_a_plain_leaf() {
        let values = vec!["men".to_string()];
        assert_eq!(
            SearchCriteria::any_of("gender", &values),
            SearchCriteria::equal("gender", "men")
        );
    }

    #[test]
    fn and_stops_evaluating_at_the_first_false_child() {
        let doc = fields(&[("brand", &["Pooma"]), ("gender", &["men"])]);
        let criteria = SearchCriteria::and(vec![
            SearchCriteria::equal("brand", "Adodis"),
            SearchCriteria::equal("gender", "men"),
        ]);

        let mut evaluated = Vec::new();
        let result = criteria.evaluate(&mut |criterion| {
            evaluated.push(criterion.value.clone());
            criterion.matches(&doc)
        });

        assert!(!result);
        assert_eq!(evaluated, vec!["Adodis"]);
    }

    #[test]
    fn or_stops_evaluating_at_the_first_true_child() {
        let doc = fields(&[("gender", &["men"])]);
        let criteria = SearchCriteria::or(vec![
            SearchCriteria::equal("gender", "ladies"),
            SearchCriteria::equal("gender", "men"),
            SearchCriteria::equal("gender", "unisex"),
        ]);

        let mut evaluated = Vec::new();
        let result = criteria.evaluate(&mut |criterion| {
            evaluated.push(criterion.value.clone());
            criterion.matches(&doc)
        });

        assert!(result);
        assert_eq!(evaluated, vec!["ladies", "men"]);
    }

    #[test]
    fn nested_composites_evaluate_recursively() {
        let doc = fields(&[("brand", &["Pooma"]), ("gender", &["unisex"])]);
        let criteria = SearchCriteria::and(vec![
            SearchCriteria::equal("brand", "Pooma"),
            SearchCriteria::or(vec![
                SearchCriteria::equal("gender", "men"),
                SearchCriteria::equal("gender", "unisex"),
            ]),
        ]);
        assert!(criteria.matches(&doc));
    }
}
