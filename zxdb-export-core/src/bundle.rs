//! Full and search bundles: the whole catalog in one file, independent of
//! bucket and page partitioning.
//!
//! Both bundles are in the global title order and take the bucket label
//! straight from each entry, so it always agrees with `index.json`.

use serde::Serialize;
use tracing::info;

use crate::aggregate::Catalog;
use crate::contract::{Bucket, Entry, FileDescriptor};
use crate::ordering::sort_entries;

/// An entry of `complete.json`: every entry field plus the bucket.
#[derive(Debug, Clone, Serialize)]
pub struct FullEntry<'a> {
    #[serde(flatten)]
    pub entry: &'a Entry,
    #[serde(rename = "l")]
    pub bucket: Bucket,
}

/// An entry of `search.json`. Score is left out.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry<'a> {
    #[serde(rename = "i")]
    pub id: i64,
    #[serde(rename = "t")]
    pub title: &'a str,
    #[serde(rename = "g")]
    pub genre: &'a str,
    #[serde(rename = "m")]
    pub machine: &'a str,
    #[serde(rename = "l")]
    pub bucket: Bucket,
    #[serde(rename = "f")]
    pub files: &'a [FileDescriptor],
}

impl<'a> From<&'a Entry> for FullEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        FullEntry {
            entry,
            bucket: entry.bucket,
        }
    }
}

impl<'a> From<&'a Entry> for SearchEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        SearchEntry {
            id: entry.id,
            title: &entry.title,
            genre: &entry.genre,
            machine: &entry.machine,
            bucket: entry.bucket,
            files: &entry.files,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bundles<'a> {
    pub full: Vec<FullEntry<'a>>,
    pub search: Vec<SearchEntry<'a>>,
}

pub fn build_bundles(catalog: &Catalog) -> Bundles<'_> {
    let mut sorted: Vec<&Entry> = catalog.entries().collect();
    sort_entries(&mut sorted);

    let full: Vec<FullEntry<'_>> = sorted.iter().copied().map(FullEntry::from).collect();
    let search: Vec<SearchEntry<'_>> = sorted.iter().copied().map(SearchEntry::from).collect();

    info!(
        full = full.len(),
        search = search.len(),
        "Built full and search bundles"
    );
    Bundles { full, search }
}
