//! Row aggregation: folds flat join rows into one [`Entry`] per id.
//!
//! The first row seen for an id creates the entry and fixes its title, genre,
//! machine, score and bucket. Every row, including the first, appends one
//! file descriptor in arrival order. Later rows that disagree on the scalar
//! fields are not merged; the first-seen values win. That is a constraint on
//! the row source (ZXDB joins never disagree), not something to rely on.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::classify::classify;
use crate::contract::{Bucket, Entry, FileDescriptor, FlatRow, ScoreRow};
use crate::error::Result;

/// All aggregated entries of one run, keyed by entry id.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: BTreeMap<i64, Entry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Groups entries by their carried bucket label. Buckets without entries
    /// are absent. Entries inside a group are in id order, not title order.
    pub fn by_bucket(&self) -> BTreeMap<Bucket, Vec<&Entry>> {
        let mut groups: BTreeMap<Bucket, Vec<&Entry>> = BTreeMap::new();
        for entry in self.entries.values() {
            groups.entry(entry.bucket).or_default().push(entry);
        }
        groups
    }
}

/// Aggregates `rows` into a [`Catalog`].
///
/// `scores` is the optional score query result. Entries without a score (or
/// every entry, when `scores` is `None`) get `0.0`. When the score rows list
/// an id more than once the first one is used.
///
/// Fails with [`crate::error::CatalogError::EmptyTitle`] if the row creating
/// an entry has an empty title.
pub fn aggregate<I>(rows: I, scores: Option<Vec<ScoreRow>>) -> Result<Catalog>
where
    I: IntoIterator<Item = FlatRow>,
{
    let mut score_by_id: HashMap<i64, f64> = HashMap::new();
    for row in scores.into_iter().flatten() {
        score_by_id.entry(row.entry_id).or_insert(row.score);
    }

    let mut entries: BTreeMap<i64, Entry> = BTreeMap::new();
    let mut row_count = 0usize;

    for row in rows {
        row_count += 1;
        let file = FileDescriptor {
            link: row.file_link,
            file_type: row.file_type,
            size: row.file_size,
        };

        if let Some(entry) = entries.get_mut(&row.entry_id) {
            if entry.title != row.title || entry.genre != row.genre || entry.machine != row.machine
            {
                debug!(
                    entry_id = row.entry_id,
                    kept_title = %entry.title,
                    row_title = %row.title,
                    "Row disagrees with first-seen entry fields, keeping first-seen values"
                );
            }
            entry.files.push(file);
            continue;
        }

        let bucket = classify(row.entry_id, &row.title)?;
        let score = score_by_id.get(&row.entry_id).copied().unwrap_or(0.0);
        entries.insert(
            row.entry_id,
            Entry {
                id: row.entry_id,
                title: row.title,
                genre: row.genre,
                machine: row.machine,
                score,
                files: vec![file],
                bucket,
            },
        );
    }

    info!(
        rows = row_count,
        entries = entries.len(),
        scored = score_by_id.len(),
        "Aggregated rows into entries"
    );

    Ok(Catalog { entries })
}
