use super::{Language, Spelling, TypeTable};
use crate::base_type::BaseType;

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTable;

impl TypeTable for TypeScriptTable {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn spelling(&self, base: BaseType) -> Spelling {
        Spelling::new(match base {
            BaseType::String => "string",
            BaseType::Integer => "number",
            BaseType::Float => "number",
            BaseType::Boolean => "boolean",
            BaseType::Date => "Date",
            // no nominal URL type on the wire
            BaseType::Uri => "string",
            BaseType::Array => "Array<{}>",
            BaseType::Dictionary => "Record<string, {}>",
        })
    }
}
