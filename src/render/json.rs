//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the FileDoc model directly. Absent comments become `null`,
//! which keeps them distinct from empty ones.

use crate::error::Result;
use crate::model::FileDoc;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &FileDoc<'_>) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
