//! Global title index with bucket and page annotations.
//!
//! Every entry gets the page it will land on in its bucket's page files. The
//! page is derived from how many entries of the same bucket precede it in the
//! global title order, which equals its position in the bucket's own title
//! order because [`crate::ordering`] is a total order.

use std::collections::BTreeMap;

use tracing::info;

use crate::aggregate::Catalog;
use crate::contract::{Bucket, Entry, IndexEntry};
use crate::ordering::sort_entries;
use crate::ITEMS_PER_PAGE;

/// Number of entries already placed, per bucket.
pub type BucketCounters = BTreeMap<Bucket, usize>;

/// 1-based page holding the entry at 0-based `position` within its bucket.
pub fn page_for_position(position: usize) -> usize {
    position / ITEMS_PER_PAGE + 1
}

/// Places one entry: returns its index row and the counters advanced by one
/// for its bucket.
pub fn place(mut counters: BucketCounters, entry: &Entry) -> (BucketCounters, IndexEntry) {
    let seen = counters.entry(entry.bucket).or_insert(0);
    let index_entry = IndexEntry {
        id: entry.id,
        title: entry.title.clone(),
        bucket: entry.bucket,
        page: page_for_position(*seen),
    };
    *seen += 1;
    (counters, index_entry)
}

/// Builds `index.json`: every entry in title order with its bucket and page.
pub fn build_index(catalog: &Catalog) -> Vec<IndexEntry> {
    let mut sorted: Vec<&Entry> = catalog.entries().collect();
    sort_entries(&mut sorted);

    let (counters, index) = sorted.into_iter().fold(
        (BucketCounters::new(), Vec::with_capacity(catalog.len())),
        |(counters, mut index), entry| {
            let (counters, index_entry) = place(counters, entry);
            index.push(index_entry);
            (counters, index)
        },
    );

    info!(
        entries = index.len(),
        buckets = counters.len(),
        "Built global title index"
    );
    index
}
