//! Context - the multi-dimensional identity of a request.
//!
//! Every piece of served content is specialized per request context: the
//! locale it is rendered in, the website it belongs to and the catalog data
//! version it was built from. A [`Context`] is an immutable set of
//! (dimension code → value) pairs with a deterministic string id, and that
//! id is what keys both the snippet cache and the search index.
//!
//! Contexts are built through a [`ContextBuilder`], which layers decorators
//! over a version-only base context. Each decorator owns exactly one
//! dimension and either passes a raw value through or derives one (for
//! example the locale decorator parses the locale out of a request URL when
//! no explicit `locale` key is present).
//!
//! ## Example
//!
//! ```
//! use projected_rust::{ContextBuilder, DataVersion};
//! use std::collections::BTreeMap;
//!
//! let builder = ContextBuilder::new(DataVersion::new("1").unwrap(), "de_DE");
//! let mut data = BTreeMap::new();
//! data.insert("website".to_string(), "ru".to_string());
//! data.insert("locale".to_string(), "de_DE".to_string());
//!
//! let context = builder.create_context(&data).unwrap();
//! assert_eq!(context.id(), "v:1_w:ru_l:de_DE");
//! assert_eq!(context.value("website").unwrap(), "ru");
//! ```

mod builder;
mod decorator;
mod source;

pub use builder::ContextBuilder;
pub use decorator::{ContextData, LocaleContextDecorator, WebsiteContextDecorator};
pub use source::ContextSource;

use std::fmt;

/// A single context dimension and its value, addressable by code.
///
/// Implementations are immutable after construction. The same set of
/// dimension values always yields the same [`Context::id`], which makes the
/// id safe to use as a cache key component and for idempotent re-projection.
pub trait Context: Send + Sync {
    /// Deterministic identity string over all supported dimensions.
    fn id(&self) -> String;

    /// The value of the given dimension code.
    fn value(&self, code: &str) -> Result<&str, ContextError>;

    /// All dimension codes this context supports.
    fn supported_codes(&self) -> Vec<String>;
}

/// Dimension codes used by the built-in decorators.
pub mod codes {
    /// Catalog data version dimension.
    pub const VERSION: &str = "version";
    /// Website dimension.
    pub const WEBSITE: &str = "website";
    /// Locale dimension.
    pub const LOCALE: &str = "locale";
}

/// Error type for context construction and dimension lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A dimension code was requested that this context does not support.
    CodeNotFound(String),
    /// The raw context data is missing a key a decorator needs.
    MissingSourceData {
        /// The dimension the decorator was deriving.
        code: &'static str,
        /// The raw keys that could have supplied it.
        expected: &'static str,
    },
    /// A data version string was empty.
    EmptyDataVersion,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::CodeNotFound(code) => {
                write!(f, "no value found in the current context for the code '{}'", code)
            }
            ContextError::MissingSourceData { code, expected } => write!(
                f,
                "unable to determine '{}' from context source data ({} not present)",
                code, expected
            ),
            ContextError::EmptyDataVersion => write!(f, "data version must not be empty"),
        }
    }
}

impl std::error::Error for ContextError {}

/// Monotonically increasing catalog data version.
///
/// The `version` context dimension is always derived from one of these, so
/// re-projecting old data reproduces the exact context ids it was originally
/// stored under.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DataVersion(String);

impl DataVersion {
    /// Create a data version from its string form.
    pub fn new(version: impl Into<String>) -> Result<Self, ContextError> {
        let version = version.into();
        if version.is_empty() {
            return Err(ContextError::EmptyDataVersion);
        }
        Ok(DataVersion(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base context carrying only the data version dimension.
///
/// Its id is `v:<version>`; decorators append their own `_<prefix>:<value>`
/// segments on top.
#[derive(Clone, Debug)]
pub struct VersionedContext {
    version: DataVersion,
}

impl VersionedContext {
    pub fn new(version: DataVersion) -> Self {
        VersionedContext { version }
    }
}

impl Context for VersionedContext {
    fn id(&self) -> String {
        format!("v:{}", self.version)
    }

    fn value(&self, code: &str) -> Result<&str, ContextError> {
        if code == codes::VERSION {
            Ok(self.version.as_str())
        } else {
            Err(ContextError::CodeNotFound(code.to_string()))
        }
    }

    fn supported_codes(&self) -> Vec<String> {
        vec![codes::VERSION.to_string()]
    }
}
