//! The one title ordering used by the index, the pages and the bundles.
//!
//! Titles compare by Unicode code point (so every uppercase title sorts before
//! any lowercase one) and equal titles fall back to the entry id. Page numbers
//! in `index.json` are only correct if the paginator slices with this exact
//! order, so nothing else in the crate may sort titles on its own.

use std::cmp::Ordering;

use crate::contract::Entry;

pub fn compare_titles(a_title: &str, a_id: i64, b_title: &str, b_id: i64) -> Ordering {
    a_title.cmp(b_title).then(a_id.cmp(&b_id))
}

pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    compare_titles(&a.title, a.id, &b.title, b.id)
}

/// Sorts entry references in title order.
pub fn sort_entries(entries: &mut [&Entry]) {
    entries.sort_by(|a, b| compare_entries(a, b));
}
