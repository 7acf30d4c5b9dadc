//! Error type shared by every stage of the catalog pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A row created an entry whose title is empty, so it has no bucket.
    #[error("entry {entry_id} has an empty title")]
    EmptyTitle { entry_id: i64 },

    #[error("row source failed: {0}")]
    RowSource(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("output path {} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}
