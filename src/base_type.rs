//! Closed vocabularies shared by the resolver and the target tables.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ————————————————————————————————————————————————————————————————————————————
// BASE TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Language-independent type concept a property resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Uri,
    /// Container; spelled through a one-hole template.
    Array,
    /// Container; spelled through a one-hole template.
    Dictionary,
}

impl BaseType {
    pub const ALL: [BaseType; 8] = [
        BaseType::String,
        BaseType::Integer,
        BaseType::Float,
        BaseType::Boolean,
        BaseType::Date,
        BaseType::Uri,
        BaseType::Array,
        BaseType::Dictionary,
    ];

    pub const fn is_container(self) -> bool {
        matches!(self, BaseType::Array | BaseType::Dictionary)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BaseType::String => "string",
            BaseType::Integer => "integer",
            BaseType::Float => "float",
            BaseType::Boolean => "boolean",
            BaseType::Date => "date",
            BaseType::Uri => "uri",
            BaseType::Array => "array",
            BaseType::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA VOCABULARY
// ————————————————————————————————————————————————————————————————————————————

/// The `type` tokens a schema property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// Always a homogeneous dictionary; fixed-shape objects are not modelled.
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaType {
    pub const fn as_str(self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
        }
    }
}

/// Unrecognized token; carries the token back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl FromStr for SchemaType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(SchemaType::Object),
            "array" => Ok(SchemaType::Array),
            "string" => Ok(SchemaType::String),
            "integer" => Ok(SchemaType::Integer),
            "number" => Ok(SchemaType::Number),
            "boolean" => Ok(SchemaType::Boolean),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// String `format` values that change the resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    /// RFC 3339, section 5.6.
    Date,
    /// RFC 3986.
    Uri,
}

impl StringFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            StringFormat::Date => "date",
            StringFormat::Uri => "uri",
        }
    }

    pub const fn base_type(self) -> BaseType {
        match self {
            StringFormat::Date => BaseType::Date,
            StringFormat::Uri => BaseType::Uri,
        }
    }
}

impl FromStr for StringFormat {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(StringFormat::Date),
            "uri" => Ok(StringFormat::Uri),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_tokens_parse_back_to_themselves() {
        for token in ["object", "array", "string", "integer", "number", "boolean"] {
            let ty: SchemaType = token.parse().unwrap();
            assert_eq!(ty.as_str(), token);
        }
    }

    #[test]
    fn unknown_schema_token_is_returned() {
        let err = "widget".parse::<SchemaType>().unwrap_err();
        assert_eq!(err, UnknownToken("widget".into()));
        // tokens are case sensitive
        assert!("String".parse::<SchemaType>().is_err());
    }

    #[test]
    fn formats_map_to_their_base_types() {
        assert_eq!("date".parse::<StringFormat>().unwrap().base_type(), BaseType::Date);
        assert_eq!("uri".parse::<StringFormat>().unwrap().base_type(), BaseType::Uri);
        assert!("date-time".parse::<StringFormat>().is_err());
    }

    #[test]
    fn only_array_and_dictionary_are_containers() {
        let containers: Vec<_> = BaseType::ALL.iter().filter(|b| b.is_container()).collect();
        assert_eq!(containers, [&BaseType::Array, &BaseType::Dictionary]);
    }
}
