//! Batch resolution: every field of a model, and optionally every model it
//! references.
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::document::{normalize_path, SchemaDocument};
use crate::error::DocumentError;
use crate::property::Property;
use crate::resolver::{locate_reference, Resolver};
use crate::target::Language;

// ————————————————————————————————————————————————————————————————————————————
// REPORTS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReport {
    pub title: Option<String>,
    pub type_name: String,
    pub path: PathBuf,
    pub language: Language,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub name: Option<String>,
    pub json_key: Option<String>,
    pub optional: bool,
    pub mutable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelReport {
    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| f.error.is_some())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DRIVER
// ————————————————————————————————————————————————————————————————————————————

/// Resolve every property of `document`. A property that fails is recorded
/// with its error; the rest of the model still resolves.
pub fn resolve_model(resolver: &Resolver, document: &SchemaDocument, language: Language) -> ModelReport {
    let fields = document
        .properties
        .par_iter()
        .map(|property| {
            let resolved = resolver.resolve_type(property, language, &document.path);
            if let Err(error) = &resolved {
                tracing::debug!(
                    model = %document.path.display(),
                    field = ?property.name,
                    %error,
                    "field did not resolve"
                );
            }
            let (ty, error) = match resolved {
                Ok(ty) => (Some(ty), None),
                Err(error) => (None, Some(error.to_string())),
            };
            FieldReport {
                name: property.name.clone(),
                json_key: property.json_key().map(str::to_owned),
                optional: property.is_optional,
                mutable: property.is_mutable,
                description: property.description.clone(),
                ty,
                error,
            }
        })
        .collect();
    ModelReport {
        title: document.title.clone(),
        type_name: document.type_name(),
        path: document.path.clone(),
        language,
        fields,
    }
}

/// Resolve the models at `roots`. With `follow_refs`, documents referenced by
/// any visited model are resolved too, each once, in discovery order.
///
/// Root documents must load; referenced ones that fail are skipped.
pub fn resolve_models(
    resolver: &Resolver,
    roots: &[PathBuf],
    language: Language,
    follow_refs: bool,
) -> Result<Vec<ModelReport>, DocumentError> {
    let mut documents: IndexMap<PathBuf, Arc<SchemaDocument>> = IndexMap::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();

    for root in roots {
        let key = normalize_path(root);
        if documents.contains_key(&key) {
            continue;
        }
        let document = resolver.cache().load(&key)?;
        documents.insert(key.clone(), document);
        queue.push_back(key);
    }

    if follow_refs {
        while let Some(current) = queue.pop_front() {
            let document = Arc::clone(&documents[&current]);
            for target in referenced_documents(&document) {
                if documents.contains_key(&target) {
                    continue;
                }
                match resolver.cache().load(&target) {
                    Ok(found) => {
                        documents.insert(target.clone(), found);
                        queue.push_back(target);
                    }
                    Err(error) => tracing::warn!(%error, "skipping referenced model"),
                }
            }
        }
    }

    Ok(documents
        .values()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|document| resolve_model(resolver, document, language))
        .collect())
}

/// Every document referenced from the properties of `document`, at any
/// nesting depth, located relative to `document`.
pub fn referenced_documents(document: &SchemaDocument) -> Vec<PathBuf> {
    fn walk(property: &Property, from: &Path, out: &mut Vec<PathBuf>) {
        if let Some(reference) = &property.reference {
            let target = locate_reference(from, reference);
            if !out.contains(&target) {
                out.push(target);
            }
            return;
        }
        for child in [&property.items, &property.additional_properties].into_iter().flatten() {
            walk(child, from, out);
        }
    }

    let mut out = Vec::new();
    for property in &document.properties {
        walk(property, &document.path, &mut out);
    }
    if let Some(reference) = &document.reference {
        let target = locate_reference(&document.path, reference);
        if !out.contains(&target) {
            out.push(target);
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn company_model_resolves_field_by_field() {
        let dir = tempdir().unwrap();
        let company = write(dir.path(), "company.json", json!({
            "title": "company",
            "description": "Definition of a Company",
            "properties": [
                { "name": "subdomain", "type": "string" },
                { "name": "name", "type": "string" },
                { "name": "logo", "type": "string", "format": "uri", "isOptional": true },
                { "name": "id", "type": "integer" },
                { "name": "broken", "type": "array" }
            ]
        }));
        let resolver = Resolver::new();
        let document = resolver.cache().load(&company).unwrap();
        let report = resolve_model(&resolver, &document, Language::Swift);

        assert_eq!(report.type_name, "Company");
        let types: Vec<_> = report.fields.iter().map(|f| f.ty.as_deref()).collect();
        assert_eq!(types, [Some("String"), Some("String"), Some("URL"), Some("Int"), None]);
        assert!(report.fields[2].optional);
        assert_eq!(report.fields[0].json_key.as_deref(), Some("subdomain"));
        assert!(!report.is_complete());
        let failed: Vec<_> = report.failures().map(|f| f.name.as_deref()).collect();
        assert_eq!(failed, [Some("broken")]);
        assert!(report.fields[4].error.as_deref().unwrap().contains("items"));
    }

    #[test]
    fn follow_refs_walks_the_closure_once() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shared")).unwrap();
        let user = write(dir.path(), "user.json", json!({
            "title": "user",
            "properties": [
                { "name": "company", "$ref": "company.json" },
                { "name": "addresses", "type": "array", "items": { "$ref": "shared/address.json" } },
                { "name": "ghost", "$ref": "ghost.json" }
            ]
        }));
        write(dir.path(), "company.json", json!({
            "title": "company",
            "properties": [{ "name": "owner", "$ref": "user.json" }]
        }));
        write(&dir.path().join("shared"), "address.json", json!({
            "title": "address",
            "properties": [{ "name": "country", "$ref": "../company.json#/x" }]
        }));

        let resolver = Resolver::new();
        let shallow = resolve_models(&resolver, &[user.clone()], Language::Rust, false).unwrap();
        assert_eq!(shallow.len(), 1);
        let types: Vec<_> = shallow[0].fields.iter().map(|f| f.ty.clone().unwrap()).collect();
        assert_eq!(types, ["Company", "Vec<Address>", ""]);

        let deep = resolve_models(&resolver, &[user.clone(), user], Language::Rust, true).unwrap();
        let names: Vec<_> = deep.iter().map(|m| m.type_name.as_str()).collect();
        assert_eq!(names, ["User", "Company", "Address"]);
        assert_eq!(deep[1].fields[0].ty.as_deref(), Some("User"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = resolve_models(&Resolver::new(), &[dir.path().join("nope.json")], Language::Swift, true)
            .unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn references_are_collected_from_nested_positions() {
        let document = SchemaDocument::from_value(
            Path::new("/s/root.json"),
            &json!({
                "$ref": "base.json",
                "properties": [
                    { "name": "a", "type": "object", "additionalProperties": { "$ref": "a.json" } },
                    { "name": "b", "type": "array", "items": { "type": "array", "items": { "$ref": "./a.json" } } },
                    { "name": "c", "type": "string" }
                ]
            }),
        );
        assert_eq!(
            referenced_documents(&document),
            [PathBuf::from("/s/a.json"), PathBuf::from("/s/base.json")]
        );
    }
}
