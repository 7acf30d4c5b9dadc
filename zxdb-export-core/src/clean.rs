use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::{CatalogError, Result};

/// Removes everything a previous run left in `output_dir` and recreates it empty.
///
/// Refuses to touch a path that exists but is not a directory.
pub fn clean_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            error!(path = %output_dir.display(), "Output path exists and is not a directory");
            return Err(CatalogError::NotADirectory(output_dir.to_path_buf()));
        }
        fs::remove_dir_all(output_dir).map_err(|e| {
            error!(error = ?e, path = %output_dir.display(), "Failed to remove previous output");
            CatalogError::io(output_dir, e)
        })?;
        debug!(path = %output_dir.display(), "Removed previous output");
    }

    fs::create_dir_all(output_dir).map_err(|e| {
        error!(error = ?e, path = %output_dir.display(), "Failed to create output dir");
        CatalogError::io(output_dir, e)
    })?;
    info!(path = %output_dir.display(), "Output directory is clean");
    Ok(())
}
