//! Error types for extraction and discovery.

use crate::model::Category;
use std::path::PathBuf;

/// Errors raised by the extraction pipeline.
///
/// Everything except `ParseAborted` is fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load the C grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid {category} pattern: {source}")]
    QueryCompile {
        category: Category,
        #[source]
        source: tree_sitter::QueryError,
    },

    #[error("{category} pattern declares unknown capture @{capture}")]
    UnexpectedCapture { category: Category, capture: String },

    #[error("parser produced no tree for {}", path.display())]
    ParseAborted { path: PathBuf },

    #[error("cannot open {}: {source}", path.display())]
    ResourceExhausted {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
