//! Property descriptors: the typed form of one field declaration.
//!
//! Decoding is lenient. Every key is checked once, here; a missing or
//! wrongly-typed key becomes `None` (or `false`), and a malformed nested
//! `items`/`additionalProperties` is treated as absent. Whether the result is
//! resolvable is decided later by the resolver.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Property {
    /// Sanitized identifier (last dotted segment of the declared name).
    pub name: Option<String>,
    /// Raw `type` token.
    pub declared_type: Option<String>,
    pub json_key: Option<String>,
    pub is_optional: bool,
    pub is_mutable: bool,
    pub description: Option<String>,
    /// Only meaningful for `type: "string"`.
    pub format: Option<String>,
    /// Raw `$ref`; takes precedence over `declared_type`.
    pub reference: Option<String>,
    /// Element type of an array.
    pub items: Option<Box<Property>>,
    /// Value type of a dictionary.
    pub additional_properties: Option<Box<Property>>,
}

// ————————————————————————————————————————————————————————————————————————————
// DECODE / ENCODE
// ————————————————————————————————————————————————————————————————————————————

impl Property {
    /// Decode from any JSON value; non-objects yield an empty descriptor.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let string = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
        let flag = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
        let nested = |key: &str| match map.get(key) {
            Some(Value::Object(inner)) => Some(Box::new(Self::from_map(inner))),
            _ => None,
        };
        Self {
            name: map
                .get("name")
                .and_then(Value::as_str)
                .map(standard_name),
            declared_type: string("type"),
            json_key: string("jsonKey"),
            is_optional: flag("isOptional"),
            is_mutable: flag("isMutable"),
            description: string("description"),
            format: string("format"),
            reference: string("$ref"),
            items: nested("items"),
            additional_properties: nested("additionalProperties"),
        }
    }

    /// Encode back to the document form. Absent keys are omitted; the two
    /// flags are always written.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        let mut put = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                out.insert(key.to_string(), Value::from(v.as_str()));
            }
        };
        put("name", &self.name);
        put("type", &self.declared_type);
        put("jsonKey", &self.json_key);
        put("description", &self.description);
        put("format", &self.format);
        put("$ref", &self.reference);
        out.insert("isOptional".into(), Value::Bool(self.is_optional));
        out.insert("isMutable".into(), Value::Bool(self.is_mutable));
        if let Some(items) = &self.items {
            out.insert("items".into(), items.to_value());
        }
        if let Some(values) = &self.additional_properties {
            out.insert("additionalProperties".into(), values.to_value());
        }
        Value::Object(out)
    }

    /// Wire key: the explicit `jsonKey`, else the name.
    pub fn json_key(&self) -> Option<&str> {
        self.json_key.as_deref().or(self.name.as_deref())
    }

    pub fn has_custom_json_key(&self) -> bool {
        self.json_key.is_some()
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

static NON_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static identifier pattern"));

/// Last dot-separated segment of a declared name, sanitized.
///
/// `com.example.userId` → `userId`.
pub fn standard_name(raw: &str) -> String {
    let last = raw.rsplit('.').next().unwrap_or(raw);
    sanitize_identifier(last)
}

/// Illegal characters become `_`; a leading digit gets a `_` prefix; empty
/// input becomes `_`. Idempotent.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut ident = NON_IDENT.replace_all(raw, "_").into_owned();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

// ------------------------------- Tests ------------------------------------ //
