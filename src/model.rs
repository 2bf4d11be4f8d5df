//! Data model for extracted documentation — format-agnostic.
//!
//! Records borrow their text from the source buffer of the file being
//! processed, so a `FileDoc` never outlives that buffer.

use serde::Serialize;
use std::fmt;

/// The three kinds of documentable C constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `typedef ... Name;`
    TypeAlias,
    /// Function prototypes.
    Function,
    /// `#define` object-like and function-like macros.
    Macro,
}

impl Category {
    /// Section order used by every renderer.
    pub const ALL: [Category; 3] = [Category::TypeAlias, Category::Function, Category::Macro];

    /// Capture name of the declaration node in this category's pattern.
    pub fn primary_capture(self) -> &'static str {
        match self {
            Category::TypeAlias => "struct",
            Category::Function => "func",
            Category::Macro => "def",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::TypeAlias => "type-alias",
            Category::Function => "function",
            Category::Macro => "macro",
        };
        f.write_str(name)
    }
}

/// A single documented declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord<'src> {
    /// Declared identifier. Empty only for malformed input.
    pub name: &'src str,
    /// Verbatim text of the declaration node.
    pub signature: &'src str,
    /// Verbatim text of the comment run directly above the declaration.
    pub leading_comment: Option<&'src str>,
    /// 1-based line where the declaration starts.
    pub line: usize,
}

/// Everything documented in one source file.
#[derive(Debug, Default, Serialize)]
pub struct FileDoc<'src> {
    /// Display name, usually the file's base name.
    pub name: String,
    pub type_aliases: Vec<DocRecord<'src>>,
    pub functions: Vec<DocRecord<'src>>,
    pub macros: Vec<DocRecord<'src>>,
}

impl<'src> FileDoc<'src> {
    pub fn records(&self, category: Category) -> &[DocRecord<'src>] {
        match category {
            Category::TypeAlias => &self.type_aliases,
            Category::Function => &self.functions,
            Category::Macro => &self.macros,
        }
    }

    pub fn records_mut(&mut self, category: Category) -> &mut Vec<DocRecord<'src>> {
        match category {
            Category::TypeAlias => &mut self.type_aliases,
            Category::Function => &mut self.functions,
            Category::Macro => &mut self.macros,
        }
    }
}
