//! Per-bucket pagination into fixed-size page files.

use tracing::debug;

use crate::contract::{Bucket, Entry, PageInfo};
use crate::ordering::sort_entries;
use crate::ITEMS_PER_PAGE;

/// The title-sorted pages of one bucket.
#[derive(Debug, Clone)]
pub struct BucketPages<'a> {
    pub bucket: Bucket,
    /// `pages[k - 1]` is page `k`.
    pub pages: Vec<Vec<&'a Entry>>,
}

impl<'a> BucketPages<'a> {
    pub fn info(&self) -> PageInfo {
        PageInfo {
            page_count: page_count(self.entry_count()),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Page `number` (1-based), if it exists.
    pub fn page(&self, number: usize) -> Option<&[&'a Entry]> {
        number
            .checked_sub(1)
            .and_then(|k| self.pages.get(k))
            .map(Vec::as_slice)
    }
}

/// Sorts the entries of one bucket and slices them into pages of at most
/// [`ITEMS_PER_PAGE`]. No entries means no pages.
pub fn paginate<'a>(bucket: Bucket, entries: &[&'a Entry]) -> BucketPages<'a> {
    let mut sorted = entries.to_vec();
    sort_entries(&mut sorted);

    let pages: Vec<Vec<&'a Entry>> = sorted
        .chunks(ITEMS_PER_PAGE)
        .map(|chunk| chunk.to_vec())
        .collect();

    debug!(
        bucket = %bucket,
        entries = sorted.len(),
        pages = pages.len(),
        "Paginated bucket"
    );
    BucketPages { bucket, pages }
}

/// Number of pages needed for `entries` entries.
pub fn page_count(entries: usize) -> usize {
    entries.div_ceil(ITEMS_PER_PAGE)
}
