//! Markdown renderer.
//!
//! Code and comments are copied verbatim; nothing is escaped or re-indented.

use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &FileDoc<'_>) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("# {}\n", doc.name));

        // Every section keeps its heading, even with no entries
        for category in Category::ALL {
            output.push_str(&format!("## {}\n", section_title(category)));
            for record in doc.records(category) {
                render_record(&mut output, record);
            }
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn section_title(category: Category) -> &'static str {
    match category {
        Category::TypeAlias => "Struct Typedefs",
        Category::Function => "Functions",
        Category::Macro => "Macros",
    }
}

/// Heading, fenced declaration, then the comment run if there is one.
fn render_record(output: &mut String, record: &DocRecord<'_>) {
    output.push_str(&format!("### {}\n", record.name));
    output.push_str("```c\n");
    output.push_str(record.signature);
    output.push_str("\n```\n");
    if let Some(comment) = record.leading_comment {
        output.push_str(comment);
        output.push('\n');
    }
    output.push('\n');
}
