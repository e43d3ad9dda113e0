//! Schema documents and the per-path load cache.
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::DocumentError;
use crate::property::{sanitize_identifier, Property};

// ————————————————————————————————————————————————————————————————————————————
// DOCUMENT
// ————————————————————————————————————————————————————————————————————————————

/// One parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Where the document was loaded from; anchors its relative `$ref`s.
    pub path: PathBuf,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Top-level `$ref`; makes a title-less document an alias of another.
    pub reference: Option<String>,
    pub properties: Vec<Property>,
}

impl SchemaDocument {
    /// Read and parse `path`. Strict: any failure is returned.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path).map_err(|error| DocumentError::Read {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let value: Value = crate::path_de::from_str_with_path(path, &source)?;
        tracing::debug!(path = %path.display(), "loaded schema document");
        Ok(Self::from_value(path, &value))
    }

    /// `properties` may be an array of property objects, or a map whose keys
    /// name the properties that omit `name`.
    pub fn from_value(path: &Path, value: &Value) -> Self {
        let string = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        let properties = match value.get("properties") {
            Some(Value::Array(xs)) => xs.iter().map(Property::from_value).collect(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(key, v)| {
                    let mut property = Property::from_value(v);
                    if property.name.is_none() {
                        let name = sanitize_identifier(key);
                        if property.json_key.is_none() && name != *key {
                            property.json_key = Some(key.clone());
                        }
                        property.name = Some(name);
                    }
                    property
                })
                .collect(),
            _ => Vec::new(),
        };
        Self {
            path: path.to_path_buf(),
            title: string("title"),
            description: string("description"),
            reference: string("$ref"),
            properties,
        }
    }

    /// Directory relative references are resolved against.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// External type name: the title with its first letter capitalized, or
    /// empty when there is no title.
    pub fn type_name(&self) -> String {
        self.title.as_deref().map(uppercase_first).unwrap_or_default()
    }
}

pub fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fold `.` and `..` without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ————————————————————————————————————————————————————————————————————————————
// CACHE
// ————————————————————————————————————————————————————————————————————————————

type Loaded = Result<Arc<SchemaDocument>, DocumentError>;

/// Load-once cache keyed by normalized path. Failed loads are cached too.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: Mutex<HashMap<PathBuf, Arc<OnceCell<Loaded>>>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, path: &Path) -> Loaded {
        let key = normalize_path(path);
        let cell = {
            let mut entries = self.entries.lock();
            entries.entry(key.clone()).or_default().clone()
        };
        // lock released: parses of different paths run concurrently
        cell.get_or_init(|| SchemaDocument::load(&key).map(Arc::new)).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ------------------------------- Tests ------------------------------------ //
