//! Fixed structural patterns and the runner that drives them.
//!
//! Each pattern captures a (possibly empty) run of comments anchored
//! directly before the declaration it documents.

use super::classify::{classify, CaptureKind, Classified};
use crate::error::{Error, Result};
use crate::model::{Category, DocRecord};
use std::collections::HashMap;
use tree_sitter::{Language, Query, QueryCursor, StreamingIterator, Tree};

const TYPE_ALIAS_PATTERN: &str = "((comment)* @comment . \
    (type_definition declarator: (type_identifier) @name) @struct)";

const FUNCTION_PATTERN: &str = "((comment)* @comment . \
    (declaration declarator: [\
        (function_declarator declarator: (identifier) @name) \
        (pointer_declarator declarator: (function_declarator declarator: (identifier) @name))\
    ]) @func)";

const MACRO_PATTERN: &str = "((comment)* @comment . \
    [(preproc_def name: (identifier) @name) \
     (preproc_function_def name: (identifier) @name)] @def)";

/// Pattern source for `category`.
pub fn pattern(category: Category) -> &'static str {
    match category {
        Category::TypeAlias => TYPE_ALIAS_PATTERN,
        Category::Function => FUNCTION_PATTERN,
        Category::Macro => MACRO_PATTERN,
    }
}

/// A compiled pattern plus the role of each of its captures.
pub struct DocQuery {
    category: Category,
    query: Query,
    kinds: Vec<CaptureKind>,
}

impl DocQuery {
    pub fn compile(language: &Language, category: Category) -> Result<Self> {
        Self::compile_source(language, category, pattern(category))
    }

    fn compile_source(language: &Language, category: Category, source: &str) -> Result<Self> {
        let query = Query::new(language, source)
            .map_err(|source| Error::QueryCompile { category, source })?;
        let kinds = query
            .capture_names()
            .iter()
            .map(|name| CaptureKind::from_capture_name(name, category))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            category,
            query,
            kinds,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Enumerate every match in `tree`, in source order.
    ///
    /// A fresh cursor is used per call and dropped once all matches are
    /// consumed. Overlapping matches for one declared name collapse to the
    /// one with the longest comment run.
    pub fn run<'src>(&self, tree: &Tree, source: &'src str) -> Vec<DocRecord<'src>> {
        let mut cursor = QueryCursor::new();
        let mut found: Vec<Classified<'src>> = Vec::new();
        let mut by_key: HashMap<((usize, usize), (usize, usize)), usize> = HashMap::new();

        let mut matches = cursor.matches(&self.query, tree.root_node(), source.as_bytes());
        while let Some(m) = matches.next() {
            let classified = classify(m, &self.kinds, source);
            match by_key.get(&classified.key()) {
                Some(&i) => {
                    if classified.supersedes(&found[i]) {
                        found[i] = classified;
                    }
                }
                None => {
                    by_key.insert(classified.key(), found.len());
                    found.push(classified);
                }
            }
        }

        found.sort_by_key(|c| (c.decl.start, c.ident.start));
        found.into_iter().map(|c| c.record).collect()
    }
}

/// The three compiled patterns, built once at startup.
pub struct DocQueries {
    type_alias: DocQuery,
    function: DocQuery,
    macros: DocQuery,
}

impl DocQueries {
    pub fn compile(language: &Language) -> Result<Self> {
        Ok(Self {
            type_alias: DocQuery::compile(language, Category::TypeAlias)?,
            function: DocQuery::compile(language, Category::Function)?,
            macros: DocQuery::compile(language, Category::Macro)?,
        })
    }

    pub fn get(&self, category: Category) -> &DocQuery {
        match category {
            Category::TypeAlias => &self.type_alias,
            Category::Function => &self.function,
            Category::Macro => &self.macros,
        }
    }
}
