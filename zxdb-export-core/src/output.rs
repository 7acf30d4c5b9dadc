//! Output layout and file writing.
//!
//! Artifacts are rendered to bytes first and written afterwards, so a run
//! that fails while building the catalog never leaves half a dataset behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::contract::Bucket;
use crate::error::{CatalogError, Result};

pub const INDEX_FILE: &str = "index.json";
pub const INFO_FILE: &str = "info.json";
pub const COMPLETE_FILE: &str = "complete.json";
pub const SEARCH_FILE: &str = "search.json";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const GZIP_SUFFIX: &str = ".gz";

/// `<BUCKET>/info.json`
pub fn info_path(bucket: Bucket) -> PathBuf {
    PathBuf::from(bucket.to_string()).join(INFO_FILE)
}

/// `<BUCKET>/<page>.json`
pub fn page_path(bucket: Bucket, page: usize) -> PathBuf {
    PathBuf::from(bucket.to_string()).join(format!("{page}.json"))
}

pub fn gzip_name(file: &str) -> String {
    format!("{file}{GZIP_SUFFIX}")
}

/// One file of the output, relative to the output root.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Artifact {
            path: path.into(),
            bytes,
        }
    }

    /// Compact JSON, UTF-8 kept as is.
    pub fn json<T: Serialize + ?Sized>(path: impl Into<PathBuf>, value: &T) -> Result<Self> {
        Ok(Artifact::new(path, serde_json::to_vec(value)?))
    }
}

/// Writes every artifact under `output_dir`, creating bucket directories as
/// needed. Returns the number of files written.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<usize> {
    for artifact in artifacts {
        let full_path = output_dir.join(&artifact.path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                error!(error = ?e, path = %parent.display(), "Failed to create directory");
                CatalogError::io(parent, e)
            })?;
        }
        fs::write(&full_path, &artifact.bytes).map_err(|e| {
            error!(error = ?e, path = %full_path.display(), "Failed to write artifact");
            CatalogError::io(&full_path, e)
        })?;
        debug!(path = %full_path.display(), bytes = artifact.bytes.len(), "Wrote artifact");
    }
    info!(
        output_dir = %output_dir.display(),
        files = artifacts.len(),
        "Wrote all artifacts"
    );
    Ok(artifacts.len())
}
