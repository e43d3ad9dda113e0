use super::{Language, Spelling, TypeTable};
use crate::base_type::BaseType;

/// Rust spellings; `Date`/`Uri` assume `chrono` and `url` in the generated crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTable;

impl TypeTable for RustTable {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn spelling(&self, base: BaseType) -> Spelling {
        Spelling::new(match base {
            BaseType::String => "String",
            BaseType::Integer => "i64",
            BaseType::Float => "f64",
            BaseType::Boolean => "bool",
            BaseType::Date => "chrono::DateTime<chrono::Utc>",
            BaseType::Uri => "url::Url",
            BaseType::Array => "Vec<{}>",
            BaseType::Dictionary => "std::collections::HashMap<String, {}>",
        })
    }
}
