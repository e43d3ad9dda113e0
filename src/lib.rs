//! Schema-driven type resolution.
//!
//! Parse property declarations out of JSON schema documents, then resolve
//! each one to a type spelling in a target language. `$ref`s resolve to the
//! capitalized `title` of the referenced document, relative to the document
//! that declared them.
pub mod base_type;
pub mod document;
pub mod error;
pub mod model;
pub mod path_de;
pub mod property;
pub mod resolver;
pub mod target;

pub use base_type::{BaseType, SchemaType, StringFormat};
pub use document::{DocumentCache, SchemaDocument};
pub use error::{DocumentError, ResolveError};
pub use model::{resolve_model, resolve_models, FieldReport, ModelReport};
pub use property::Property;
pub use resolver::{resolve_type, Resolver};
pub use target::{Language, Spelling, TypeTable};
