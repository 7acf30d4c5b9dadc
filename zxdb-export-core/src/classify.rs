//! Letter classification of titles into buckets.
//!
//! The first character of the title is uppercased with the full Unicode
//! mapping. If that produces exactly one character in `A..=Z` it is the
//! bucket, otherwise the title goes to `_`. Lowercase titles therefore land
//! in their letter's bucket (`zen` is in `Z`), and expansions such as
//! `ß` -> `SS` land in `_`.

use crate::contract::Bucket;
use crate::error::{CatalogError, Result};

/// Returns the bucket for `title`. `entry_id` is only used for the error.
pub fn classify(entry_id: i64, title: &str) -> Result<Bucket> {
    let first = title
        .chars()
        .next()
        .ok_or(CatalogError::EmptyTitle { entry_id })?;

    let mut upper = first.to_uppercase();
    let bucket = match (upper.next(), upper.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Bucket::from_key(c).unwrap_or(Bucket::OTHER),
        _ => Bucket::OTHER,
    };
    Ok(bucket)
}
