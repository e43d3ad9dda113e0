use super::{Language, Spelling, TypeTable};
use crate::base_type::BaseType;

#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftTable;

impl TypeTable for SwiftTable {
    fn language(&self) -> Language {
        Language::Swift
    }

    fn spelling(&self, base: BaseType) -> Spelling {
        Spelling::new(match base {
            BaseType::String => "String",
            BaseType::Integer => "Int",
            BaseType::Float => "Float",
            BaseType::Boolean => "Bool",
            BaseType::Date => "Date",
            BaseType::Uri => "URL",
            BaseType::Array => "[{}]",
            BaseType::Dictionary => "[String: {}]",
        })
    }
}
