use super::{Language, Spelling, TypeTable};
use crate::base_type::BaseType;

/// Objective-C spellings. Object types carry their pointer star, so nested
/// generics read `NSArray<NSArray<NSString *> *> *`. Lightweight generics only
/// take object types, so scalar elements are boxed as `NSNumber *`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjcTable;

const BOXED: &str = "NSNumber *";

impl ObjcTable {
    fn boxed(inner: &str) -> &str {
        let scalars = [BaseType::Integer, BaseType::Float, BaseType::Boolean];
        if scalars.iter().any(|base| ObjcTable.spelling(*base).as_str() == inner) {
            BOXED
        } else {
            inner
        }
    }
}

impl TypeTable for ObjcTable {
    fn language(&self) -> Language {
        Language::Objc
    }

    fn spelling(&self, base: BaseType) -> Spelling {
        Spelling::new(match base {
            BaseType::String => "NSString *",
            BaseType::Integer => "NSInteger",
            BaseType::Float => "double",
            BaseType::Boolean => "BOOL",
            BaseType::Date => "NSDate *",
            BaseType::Uri => "NSURL *",
            BaseType::Array => "NSArray<{}> *",
            BaseType::Dictionary => "NSDictionary<NSString *, {}> *",
        })
    }

    fn array_of(&self, element: &str) -> String {
        self.spelling(BaseType::Array).fill(Self::boxed(element))
    }

    fn dictionary_of(&self, value: &str) -> String {
        self.spelling(BaseType::Dictionary).fill(Self::boxed(value))
    }
}
