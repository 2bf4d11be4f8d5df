//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::error::Result;
use crate::model::FileDoc;
use anyhow::anyhow;

/// Trait for rendering a FileDoc into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &FileDoc<'_>) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> anyhow::Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
