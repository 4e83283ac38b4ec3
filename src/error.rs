use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelreview operations.
///
/// Per-annotation extraction failures are deliberately absent: those are
/// recovered and recorded in [`crate::extract::Extraction::skipped`].
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read COCO dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize COCO JSON for {path}: {source}")]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No category selected (pass --category <INDEX> or --name <NAME>)")]
    MissingCategorySelection,

    #[error("Category index {index} is out of range (dataset has {count} categories)")]
    CategoryIndexOutOfRange { index: usize, count: usize },

    #[error("No category named '{0}'")]
    CategoryNotFound(String),

    #[error("No instances to review for category '{category}' ({skipped} annotation(s) skipped)")]
    EmptyExtractionResult { category: String, skipped: usize },

    #[error("Review session is exhausted: all {total} instance(s) have been visited")]
    SessionExhausted { total: usize },

    #[error("Instance index {index} is out of range (session has {total} instance(s))")]
    OutOfRange { index: usize, total: usize },

    #[error("Failed to write rejection export {path}: {source}")]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown review command: '{0}' (type ? for help)")]
    UnknownCommand(String),
}

impl ReviewError {
    /// True for failures of the dataset load step (unreadable or malformed file).
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ReviewError::DatasetRead { .. } | ReviewError::CocoJsonParse { .. }
        )
    }
}
