//! High-level pipeline: orchestrates fetch → aggregate → render → write.
//!
//! This module provides the top-level orchestration for one generator run. It:
//!   - Fetches the entry/download rows and the optional scores from a [`RowSource`]
//!   - Aggregates them into a [`Catalog`]
//!   - Renders the index, every bucket's pages, the bundles, their gzip
//!     variants and the sitemap into memory
//!   - Cleans the output directory and writes everything out
//!
//! # Responsibilities
//! - Fail-fast: the first failing step returns its error, except the score
//!   fetch, whose failure only defaults every score to 0. Nothing is written
//!   until every artifact has been rendered, so a row source or data error
//!   leaves the previous output in place.
//! - A run always regenerates the whole dataset; previous output is never read.
//!
//! # Navigation
//! - Main entrypoint: [`generate`]
//! - In-memory rendering: [`render`]
//! - Supporting types: [`GenerateReport`], [`BucketReport`], [`Rendered`]

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::aggregate::{aggregate, Catalog};
use crate::bundle::build_bundles;
use crate::clean::clean_output_dir;
use crate::compress::{compress_artifact, CompressionReport};
use crate::config::GenerateConfig;
use crate::contract::{Bucket, IndexEntry, RowSource};
use crate::error::{CatalogError, Result};
use crate::index::build_index;
use crate::output::{
    gzip_name, info_path, page_path, write_artifacts, Artifact, COMPLETE_FILE, INDEX_FILE,
    SEARCH_FILE, SITEMAP_FILE,
};
use crate::paginate::paginate;
use crate::sitemap::render_sitemap;

#[derive(Debug, Clone, PartialEq)]
pub struct BucketReport {
    pub bucket: Bucket,
    pub entries: usize,
    pub pages: usize,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: std::path::PathBuf,
    pub entries: usize,
    pub buckets: Vec<BucketReport>,
    pub compression: Vec<CompressionReport>,
    pub files_written: usize,
}

/// Everything a run writes, still in memory.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub index: Vec<IndexEntry>,
    pub buckets: Vec<BucketReport>,
    pub compression: Vec<CompressionReport>,
    pub artifacts: Vec<Artifact>,
}

/// Renders every output artifact for `catalog`. `lastmod` stamps the sitemap.
pub fn render(config: &GenerateConfig, catalog: &Catalog, lastmod: NaiveDate) -> Result<Rendered> {
    let mut artifacts = Vec::new();

    let index = build_index(catalog);
    artifacts.push(Artifact::json(INDEX_FILE, &index)?);

    // Every bucket gets an info.json, so an empty one reads as {"p":0}.
    let mut groups = catalog.by_bucket();
    let mut buckets = Vec::new();
    for bucket in Bucket::all() {
        let entries = groups.remove(&bucket).unwrap_or_default();
        let pages = paginate(bucket, &entries);
        artifacts.push(Artifact::json(info_path(bucket), &pages.info())?);
        for (k, page) in pages.pages.iter().enumerate() {
            artifacts.push(Artifact::json(page_path(bucket, k + 1), page)?);
        }
        info!(
            bucket = %bucket,
            entries = pages.entry_count(),
            pages = pages.pages.len(),
            "Rendered bucket pages"
        );
        buckets.push(BucketReport {
            bucket,
            entries: pages.entry_count(),
            pages: pages.pages.len(),
        });
    }

    let bundles = build_bundles(catalog);
    let complete = serde_json::to_vec(&bundles.full)?;
    let search = serde_json::to_vec(&bundles.search)?;

    let mut compression = Vec::new();
    if config.compress {
        for (name, bytes) in [(COMPLETE_FILE, &complete), (SEARCH_FILE, &search)] {
            let (gz, report) = compress_artifact(name, bytes).map_err(|e| {
                error!(error = ?e, artifact = name, "Compression failed");
                CatalogError::io(gzip_name(name), e)
            })?;
            artifacts.push(Artifact::new(gzip_name(name), gz));
            compression.push(report);
        }
    }
    artifacts.push(Artifact::new(COMPLETE_FILE, complete));
    artifacts.push(Artifact::new(SEARCH_FILE, search));

    let sitemap = render_sitemap(&config.base_url, &index, lastmod);
    artifacts.push(Artifact::new(SITEMAP_FILE, sitemap.into_bytes()));

    Ok(Rendered {
        index,
        buckets,
        compression,
        artifacts,
    })
}

/// Runs the whole pipeline against `source` and writes the dataset to
/// `config.output_dir`.
pub async fn generate<S>(config: &GenerateConfig, source: &S) -> Result<GenerateReport>
where
    S: RowSource + ?Sized,
{
    info!("[GENERATE] Starting catalog generation");

    let rows = source.fetch_rows().await.map_err(|e| {
        error!(error = %e, "[GENERATE][ERROR] Fetching rows failed");
        CatalogError::RowSource(e.to_string())
    })?;
    info!(rows = rows.len(), "[GENERATE] Fetched rows");

    // Scores are optional metadata; a failing score query only zeroes them.
    let scores = source.fetch_scores().await.unwrap_or_else(|e| {
        warn!(error = %e, "[GENERATE] Fetching scores failed, defaulting every score to 0");
        None
    });
    match &scores {
        Some(s) => info!(scores = s.len(), "[GENERATE] Fetched scores"),
        None => info!("[GENERATE] Row source has no scores, defaulting every score to 0"),
    }

    let catalog = aggregate(rows, scores).map_err(|e| {
        error!(error = %e, "[GENERATE][ERROR] Aggregation failed");
        e
    })?;

    let rendered = render(config, &catalog, Utc::now().date_naive())?;
    info!(
        artifacts = rendered.artifacts.len(),
        "[GENERATE] Rendered all artifacts in memory"
    );

    clean_output_dir(&config.output_dir)?;
    let files_written = write_artifacts(&config.output_dir, &rendered.artifacts)?;

    info!(
        entries = catalog.len(),
        files = files_written,
        "[GENERATE] Catalog generation complete"
    );

    Ok(GenerateReport {
        output_dir: config.output_dir.clone(),
        entries: catalog.len(),
        buckets: rendered.buckets,
        compression: rendered.compression,
        files_written,
    })
}
