//! Target type tables: one per output language.
//!
//! Each table spells all eight [`BaseType`]s. Containers are spelled through a
//! template with exactly one `{}` hole that receives the already-resolved
//! element (or value) type. Adding a language means adding one table here.
pub mod objc;
pub mod rust;
pub mod swift;
pub mod typescript;

use std::fmt;

use serde::Serialize;

use crate::base_type::BaseType;

pub use objc::ObjcTable;
pub use rust::RustTable;
pub use swift::SwiftTable;
pub use typescript::TypeScriptTable;

// ————————————————————————————————————————————————————————————————————————————
// SPELLINGS
// ————————————————————————————————————————————————————————————————————————————

/// A concrete type spelling, possibly holding one substitution slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling(&'static str);

impl Spelling {
    /// Marker replaced by the inner type in container templates.
    pub const HOLE: &'static str = "{}";

    pub const fn new(raw: &'static str) -> Self {
        Self(raw)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn holes(&self) -> usize {
        self.0.matches(Self::HOLE).count()
    }

    /// Substitute `inner` into the hole, exactly once.
    pub fn fill(&self, inner: &str) -> String {
        self.0.replacen(Self::HOLE, inner, 1)
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TABLES
// ————————————————————————————————————————————————————————————————————————————

/// Maps base types to one language's spellings. Stateless; shared freely.
pub trait TypeTable: Send + Sync {
    fn language(&self) -> Language;
    fn spelling(&self, base: BaseType) -> Spelling;

    /// Spelling for a non-container base type.
    fn scalar(&self, base: BaseType) -> String {
        debug_assert!(!base.is_container(), "{base} needs an inner type");
        self.spelling(base).as_str().to_string()
    }

    fn array_of(&self, element: &str) -> String {
        self.spelling(BaseType::Array).fill(element)
    }

    fn dictionary_of(&self, value: &str) -> String {
        self.spelling(BaseType::Dictionary).fill(value)
    }
}

/// Output language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Swift,
    Objc,
    Rust,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Swift,
        Language::Objc,
        Language::Rust,
        Language::TypeScript,
    ];

    pub fn table(self) -> &'static dyn TypeTable {
        match self {
            Language::Swift => &SwiftTable,
            Language::Objc => &ObjcTable,
            Language::Rust => &RustTable,
            Language::TypeScript => &TypeScriptTable,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::Objc => "objc",
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_reports_its_own_language() {
        for lang in Language::ALL {
            assert_eq!(lang.table().language(), lang);
        }
    }

    #[test]
    fn containers_have_one_hole_and_scalars_none() {
        for lang in Language::ALL {
            let table = lang.table();
            for base in BaseType::ALL {
                let spelling = table.spelling(base);
                let expected = if base.is_container() { 1 } else { 0 };
                assert_eq!(spelling.holes(), expected, "{lang}: {base} => {spelling}");
                assert!(!spelling.as_str().is_empty(), "{lang}: {base} is empty");
            }
        }
    }

    #[test]
    fn fill_substitutes_exactly_once() {
        let spelling = Spelling::new("Pair<{}, {}>");
        assert_eq!(spelling.fill("A"), "Pair<A, {}>");
        // inner text containing the marker is left alone
        assert_eq!(Spelling::new("[{}]").fill("{}"), "[{}]");
    }

    #[test]
    fn container_helpers_use_the_templates() {
        let swift = Language::Swift.table();
        assert_eq!(swift.array_of("Int"), "[Int]");
        assert_eq!(swift.dictionary_of("Int"), "[String: Int]");
        assert_eq!(swift.array_of(&swift.array_of("String")), "[[String]]");
    }
}
