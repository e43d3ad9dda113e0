//! Property → target-language type resolution.
//!
//! Precedence, per property:
//! 1. `$ref` short-circuits everything and resolves to the referenced
//!    document's capitalized title, independent of language.
//! 2. Otherwise `type` must be present and in the schema vocabulary.
//! 3. Containers recurse into `items` / `additionalProperties` and wrap the
//!    result in the table's template; strings honour a recognized `format`.
//!
//! Every call carries the path of the document that declared the property, so
//! relative references never depend on the working directory.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base_type::{BaseType, SchemaType, StringFormat};
use crate::document::{normalize_path, DocumentCache};
use crate::error::ResolveError;
use crate::property::Property;
use crate::target::Language;

/// Resolves properties for any target language. Cheap to clone; clones
/// share one document cache.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    cache: Arc<DocumentCache>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<DocumentCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<DocumentCache> {
        &self.cache
    }

    /// Resolve `property`, declared in the document at `document`, to a type
    /// spelling in `language`.
    pub fn resolve_type(
        &self,
        property: &Property,
        language: Language,
        document: &Path,
    ) -> Result<String, ResolveError> {
        if let Some(reference) = &property.reference {
            return self.resolve_ref(reference, document);
        }

        let token = property.declared_type.as_deref().ok_or(ResolveError::MissingType)?;
        let schema_type: SchemaType = token
            .parse()
            .map_err(|_| ResolveError::InvalidSchemaType(token.to_string()))?;

        let table = language.table();
        let resolved = match schema_type {
            SchemaType::Object => {
                let values = property
                    .additional_properties
                    .as_deref()
                    .ok_or(ResolveError::MissingAdditionalProperties)?;
                table.dictionary_of(&self.resolve_type(values, language, document)?)
            }
            SchemaType::Array => {
                let items = property.items.as_deref().ok_or(ResolveError::MissingItems)?;
                table.array_of(&self.resolve_type(items, language, document)?)
            }
            SchemaType::String => {
                // unknown formats fall back to plain strings
                let base = property
                    .format
                    .as_deref()
                    .and_then(|f| f.parse::<StringFormat>().ok())
                    .map_or(BaseType::String, StringFormat::base_type);
                table.scalar(base)
            }
            SchemaType::Integer => table.scalar(BaseType::Integer),
            SchemaType::Number => table.scalar(BaseType::Float),
            SchemaType::Boolean => table.scalar(BaseType::Boolean),
        };
        tracing::trace!(name = ?property.name, %language, %resolved, "resolved property");
        Ok(resolved)
    }

    /// Best-effort reference lookup: a referenced document that cannot be
    /// read or parsed resolves to `""` and is logged, never returned as an
    /// error. Cyclic alias chains are still reported.
    pub fn resolve_ref(&self, reference: &str, document: &Path) -> Result<String, ResolveError> {
        match self.try_resolve_ref(reference, document) {
            Err(ResolveError::Document(error)) => {
                tracing::warn!(
                    reference,
                    from = %document.display(),
                    %error,
                    "referenced schema could not be loaded; using an empty type name"
                );
                Ok(String::new())
            }
            other => other,
        }
    }

    /// Strict reference lookup. Title-less documents that are themselves a
    /// `$ref` are followed, each hop anchored at its own directory.
    pub fn try_resolve_ref(&self, reference: &str, document: &Path) -> Result<String, ResolveError> {
        let mut visited: Vec<PathBuf> = Vec::new();
        let mut target = locate_reference(document, reference);
        loop {
            if visited.contains(&target) {
                return Err(ResolveError::CyclicReference { path: target });
            }
            let loaded = self.cache.load(&target)?;
            visited.push(target);
            if loaded.title.is_some() {
                return Ok(loaded.type_name());
            }
            match &loaded.reference {
                Some(next) => target = locate_reference(&loaded.path, next),
                None => {
                    tracing::debug!(path = %loaded.path.display(), "referenced schema has no title");
                    return Ok(String::new());
                }
            }
        }
    }
}

/// Location of the document `reference` points at, relative to the directory
/// of `document`. The fragment is dropped; an empty path means `document`.
pub fn locate_reference(document: &Path, reference: &str) -> PathBuf {
    let file = reference.split_once('#').map_or(reference, |(file, _)| file);
    if file.is_empty() {
        return normalize_path(document);
    }
    let base = document.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&base.join(file))
}

/// Resolve with a fresh resolver.
pub fn resolve_type(property: &Property, language: Language, document: &Path) -> Result<String, ResolveError> {
    Resolver::new().resolve_type(property, language, document)
}

// ------------------------------- Tests ------------------------------------ //
