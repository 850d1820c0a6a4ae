//! Registry mapping content-type codes to their key generators.

use std::collections::HashMap;
use std::sync::Arc;

use super::{SnippetKeyError, SnippetKeyGenerator};

/// Maps a content-type code to its [`SnippetKeyGenerator`].
///
/// Populated once at startup; duplicate registrations are rejected so a
/// renderer cannot silently shadow another renderer's keyspace.
#[derive(Default)]
pub struct SnippetKeyGeneratorLocator {
    generators: HashMap<String, Arc<dyn SnippetKeyGenerator>>,
}

impl SnippetKeyGeneratorLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator under a content-type code.
    pub fn register(
        &mut self,
        code: impl Into<String>,
        generator: Arc<dyn SnippetKeyGenerator>,
    ) -> Result<(), SnippetKeyError> {
        let code = code.into();
        if self.generators.contains_key(&code) {
            return Err(SnippetKeyError::DuplicateSnippetCode(code));
        }
        self.generators.insert(code, generator);
        Ok(())
    }

    /// Look up the generator for a content-type code.
    pub fn key_generator_for_snippet_code(
        &self,
        code: &str,
    ) -> Result<Arc<dyn SnippetKeyGenerator>, SnippetKeyError> {
        self.generators
            .get(code)
            .cloned()
            .ok_or_else(|| SnippetKeyError::UnknownSnippetCode(code.to_string()))
    }
}
