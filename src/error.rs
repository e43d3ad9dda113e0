//! Error types for document loading and type resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load one schema document.
///
/// Cheap to clone so a failed load can be cached alongside successful ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read schema document {}: {message}", path.display())]
    Read {
        /// Location that was read.
        path: PathBuf,
        /// Underlying IO error, rendered.
        message: String,
    },

    /// The file is not valid JSON.
    #[error("failed to parse schema document {}: {message}", path.display())]
    Parse {
        /// Location that was parsed.
        path: PathBuf,
        /// Parser message with JSON path context.
        message: String,
    },
}

impl DocumentError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Structural failure resolving a single property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Neither `type` nor `$ref` is set.
    #[error("property declares neither `type` nor `$ref`")]
    MissingType,

    /// `type` is outside the schema vocabulary.
    #[error("invalid schema type '{0}'")]
    InvalidSchemaType(String),

    /// `type: "array"` without `items`.
    #[error("array property is missing `items`")]
    MissingItems,

    /// `type: "object"` without `additionalProperties`.
    #[error("object property is missing `additionalProperties`")]
    MissingAdditionalProperties,

    /// A chain of title-less alias documents loops back on itself.
    #[error("cyclic `$ref` chain re-enters {}", path.display())]
    CyclicReference {
        /// First document visited twice.
        path: PathBuf,
    },

    /// Only raised by the strict reference lookup.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
