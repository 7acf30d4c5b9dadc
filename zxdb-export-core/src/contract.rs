//! # contract: data model and the row source seam
//!
//! This module defines the plain data types that flow through the catalog
//! pipeline and the [`RowSource`] trait through which rows enter it.
//!
//! ## Wire names
//! Every type that ends up in an emitted JSON file serializes with the short
//! key aliases the static front end reads (`i`, `t`, `g`, `m`, `sc`, `f`,
//! `l`, `y`, `s`, `p`). Changing a rename here breaks deployed clients.
//!
//! ## Mocking & Testing
//! - `RowSource` is annotated for `mockall`, so `MockRowSource` is available
//!   to tests and to dependents built with the `test-export-mocks` feature.

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::fmt;

use mockall::automock;

/// One row of the entry/download join: a catalog entry paired with one of its files.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub entry_id: i64,
    pub title: String,
    pub genre: String,
    pub machine: String,
    pub file_link: String,
    /// Nullable in ZXDB.
    pub file_size: Option<i64>,
    pub file_type: String,
}

/// One row of the optional score query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub entry_id: i64,
    pub score: f64,
}

/// A downloadable file of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDescriptor {
    #[serde(rename = "l")]
    pub link: String,
    #[serde(rename = "y")]
    pub file_type: String,
    #[serde(rename = "s")]
    pub size: Option<i64>,
}

/// Alphabetic partition of the catalog: `A` to `Z`, or `_` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bucket(char);

impl Bucket {
    pub const OTHER: Bucket = Bucket('_');

    /// All 27 buckets, `A` through `Z` followed by `_`.
    pub fn all() -> impl Iterator<Item = Bucket> {
        ('A'..='Z').map(Bucket).chain(std::iter::once(Bucket::OTHER))
    }

    /// Returns the bucket for a key character, if it is one of the 27 keys.
    pub fn from_key(key: char) -> Option<Bucket> {
        if key.is_ascii_uppercase() || key == '_' {
            Some(Bucket(key))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.0.encode_utf8(&mut buf))
    }
}

/// One catalog item, aggregated from every row sharing its id.
///
/// Scalar fields come from the first row seen for the id. The bucket is
/// assigned once at creation and travels with the entry; it is not part of
/// the page file format, so it is skipped when serializing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(rename = "i")]
    pub id: i64,
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "g")]
    pub genre: String,
    #[serde(rename = "m")]
    pub machine: String,
    #[serde(rename = "sc")]
    pub score: f64,
    #[serde(rename = "f")]
    pub files: Vec<FileDescriptor>,
    #[serde(skip)]
    pub bucket: Bucket,
}

/// A row of `index.json`: where to find an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    #[serde(rename = "i")]
    pub id: i64,
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "l")]
    pub bucket: Bucket,
    /// 1-based page within the bucket.
    #[serde(rename = "p")]
    pub page: usize,
}

/// Contents of `<BUCKET>/info.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    #[serde(rename = "p")]
    pub page_count: usize,
}

/// Error type for RowSource (boxed, like any other collaborator error).
pub type RowSourceError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for fetching the flat rows the catalog is built from.
///
/// Implemented by the SQLite source in the CLI crate and by mocks in tests.
/// Rows should be ordered by entry id; aggregation does not depend on it, but
/// a stable order keeps runs reproducible.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch every (entry, file) row.
    async fn fetch_rows(&self) -> Result<Vec<FlatRow>, RowSourceError>;

    /// Fetch per-entry scores, or `None` when this source has no scores.
    /// Coverage of entry ids is not guaranteed.
    async fn fetch_scores(&self) -> Result<Option<Vec<ScoreRow>>, RowSourceError>;
}
