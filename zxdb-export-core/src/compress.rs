//! Gzip variants of the bundles and the size report printed after a run.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

/// Sizes before and after compressing one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub name: String,
    pub uncompressed: usize,
    pub compressed: usize,
    /// Percentage saved, `(1 - compressed / uncompressed) * 100` within `[0, 100]`.
    pub ratio: f64,
}

impl CompressionReport {
    pub fn new(name: impl Into<String>, uncompressed: usize, compressed: usize) -> Self {
        CompressionReport {
            name: name.into(),
            uncompressed,
            compressed,
            ratio: reduction_ratio(uncompressed, compressed),
        }
    }
}

/// Percentage reduction. An empty input, or one that grew, reports 0.
pub fn reduction_ratio(uncompressed: usize, compressed: usize) -> f64 {
    if uncompressed == 0 {
        return 0.0;
    }
    let ratio = (1.0 - compressed as f64 / uncompressed as f64) * 100.0;
    ratio.clamp(0.0, 100.0)
}

pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Compresses `data` and reports the saving under `name`.
pub fn compress_artifact(name: &str, data: &[u8]) -> std::io::Result<(Vec<u8>, CompressionReport)> {
    let compressed = gzip(data)?;
    let report = CompressionReport::new(name, data.len(), compressed.len());
    info!(
        artifact = name,
        uncompressed = report.uncompressed,
        compressed = report.compressed,
        ratio = report.ratio,
        "Compressed artifact"
    );
    Ok((compressed, report))
}
