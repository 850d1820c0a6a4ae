//! Sort order applied to search results.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrderDirection {
    Asc,
    Desc,
}

/// Attribute code and direction results are ordered by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderConfig {
    pub attribute_code: String,
    pub direction: SortOrderDirection,
}

impl SortOrderConfig {
    pub fn new(attribute_code: impl Into<String>, direction: SortOrderDirection) -> Self {
        SortOrderConfig {
            attribute_code: attribute_code.into(),
            direction,
        }
    }

    pub fn asc(attribute_code: impl Into<String>) -> Self {
        Self::new(attribute_code, SortOrderDirection::Asc)
    }

    pub fn desc(attribute_code: impl Into<String>) -> Self {
        Self::new(attribute_code, SortOrderDirection::Desc)
    }
}
