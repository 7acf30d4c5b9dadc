/// `load_config` module: Loads a static YAML config file, applies environment overrides and maps it
/// into the core crate's [`GenerateConfig`] plus the settings of the SQLite row source.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into typed structs
/// - Apply `ZXDB_DATABASE` / `ZXDB_OUTPUT_DIR` overrides from the environment
/// - Reject configs the generator cannot use (empty base URL)
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use zxdb_export_core::config::GenerateConfig;

pub const DATABASE_ENV: &str = "ZXDB_DATABASE";
pub const OUTPUT_DIR_ENV: &str = "ZXDB_OUTPUT_DIR";

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSection {
    pub database: PathBuf,
    #[serde(default = "default_scores")]
    pub scores: bool,
    #[serde(default)]
    pub score_query: Option<String>,
}

fn default_scores() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    pub dir: PathBuf,
    pub base_url: String,
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_compress() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub source: SourceSection,
    pub generate: GenerateConfig,
}

impl CliConfig {
    pub fn trace_loaded(&self) {
        info!(
            database = %self.source.database.display(),
            scores = self.source.scores,
            "Loaded source config"
        );
        self.generate.trace_loaded();
    }
}

/// Loads the YAML config at `path` and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
        anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e)
    })?;

    #[derive(Debug, Deserialize)]
    struct RawConfig {
        source: SourceSection,
        output: OutputSection,
    }

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let mut source = raw.source;
    let mut output = raw.output;

    if let Some(database) = env_path(DATABASE_ENV)? {
        info!(database = %database.display(), "Database path overridden from env");
        source.database = database;
    }
    if let Some(dir) = env_path(OUTPUT_DIR_ENV)? {
        info!(output_dir = %dir.display(), "Output dir overridden from env");
        output.dir = dir;
    }

    if output.base_url.trim().is_empty() {
        error!(config_path = ?path_ref, "output.base_url is empty");
        bail!("output.base_url must not be empty");
    }

    Ok(CliConfig {
        source,
        generate: GenerateConfig {
            output_dir: output.dir,
            base_url: output.base_url,
            compress: output.compress,
        },
    })
}

/// Reads an optional path override. Set-but-empty counts as unset.
fn env_path(var: &str) -> Result<Option<PathBuf>> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{var} is not valid unicode")),
    }
}
