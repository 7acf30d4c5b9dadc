use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// What the generator writes and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    pub output_dir: PathBuf,
    /// Public site root the sitemap URLs are built on.
    pub base_url: String,
    /// Also write `complete.json.gz` and `search.json.gz`.
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_compress() -> bool {
    true
}

impl GenerateConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            base_url = %self.base_url,
            compress = self.compress,
            "Loaded GenerateConfig"
        );
        debug!(?self, "GenerateConfig loaded (full debug)");
    }
}
