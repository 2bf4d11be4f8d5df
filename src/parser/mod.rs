//! C source parsing and per-file documentation extraction.

pub mod classify;
pub mod query;
pub mod span;

use crate::error::{Error, Result};
use crate::model::{Category, FileDoc};
use query::DocQueries;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Parser, Tree};

/// Owns the C parser and the compiled patterns for the whole run.
pub struct Extractor {
    parser: Parser,
    queries: DocQueries,
}

impl Extractor {
    /// Load the grammar and compile every pattern. Fails fast on a bad pattern.
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_c::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let queries = DocQueries::compile(&language)?;
        Ok(Self { parser, queries })
    }

    /// Parse `source` and collect its documentation under the display `name`.
    ///
    /// Syntax errors are tolerated; they only reduce what gets matched.
    pub fn extract<'src>(&mut self, path: &Path, name: &str, source: &'src str) -> Result<FileDoc<'src>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseAborted {
                path: path.to_path_buf(),
            })?;
        if tree.root_node().has_error() {
            debug!(path = %path.display(), "source contains syntax errors");
        }
        Ok(aggregate(&self.queries, &tree, source, name))
    }
}

/// Run every category against one tree.
pub fn aggregate<'src>(queries: &DocQueries, tree: &Tree, source: &'src str, name: &str) -> FileDoc<'src> {
    let mut doc = FileDoc {
        name: name.to_string(),
        ..Default::default()
    };
    for category in Category::ALL {
        let query = queries.get(category);
        let records = query.run(tree, source);
        debug!(category = %query.category(), count = records.len(), "matched declarations");
        *doc.records_mut(category) = records;
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"#ifndef LIST_H
#define LIST_H

/* Node of a singly linked list. */
typedef struct node {
    int value;
    struct node *next;
} node_t;

// Push a value onto the list.
// Returns the new head.
node_t *list_push(node_t *head, int value);

void list_free(node_t *head);

/** Upper bound on list length. */
#define LIST_MAX 1024

typedef int (*visit_fn)(int value);

#endif // LIST_H
"#;

    fn names<'a>(doc: &'a FileDoc<'_>, category: Category) -> Vec<&'a str> {
        doc.records(category).iter().map(|r| r.name).collect()
    }

    #[test]
    fn aggregate_collects_all_categories() {
        let mut extractor = Extractor::new().unwrap();
        let doc = extractor.extract(Path::new("list.h"), "list.h", HEADER).unwrap();

        assert_eq!(doc.name, "list.h");
        assert_eq!(names(&doc, Category::TypeAlias), ["node_t"]);
        assert_eq!(names(&doc, Category::Function), ["list_push", "list_free"]);
        assert_eq!(names(&doc, Category::Macro), ["LIST_H", "LIST_MAX"]);

        let push = &doc.functions[0];
        assert_eq!(push.signature, "node_t *list_push(node_t *head, int value);");
        assert_eq!(
            push.leading_comment,
            Some("// Push a value onto the list.\n// Returns the new head.")
        );
        assert_eq!(doc.functions[1].leading_comment, None);
        assert_eq!(doc.macros[0].leading_comment, None);
        assert_eq!(doc.macros[1].leading_comment, Some("/** Upper bound on list length. */"));
    }

    #[test]
    fn extracted_text_is_a_slice_of_the_source() {
        let mut extractor = Extractor::new().unwrap();
        let doc = extractor.extract(Path::new("list.h"), "list.h", HEADER).unwrap();
        for category in Category::ALL {
            for record in doc.records(category) {
                assert!(HEADER.contains(record.signature));
                if let Some(comment) = record.leading_comment {
                    assert!(HEADER.contains(comment));
                    assert!(!comment.is_empty());
                }
            }
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let mut extractor = Extractor::new().unwrap();
        let first = extractor.extract(Path::new("a.h"), "a.h", HEADER).unwrap();
        let second = extractor.extract(Path::new("a.h"), "a.h", HEADER).unwrap();
        for category in Category::ALL {
            assert_eq!(first.records(category), second.records(category));
        }
    }

    #[test]
    fn empty_source_gives_empty_doc() {
        let mut extractor = Extractor::new().unwrap();
        let doc = extractor.extract(Path::new("empty.h"), "empty.h", "").unwrap();
        for category in Category::ALL {
            assert!(doc.records(category).is_empty());
        }
    }
}
