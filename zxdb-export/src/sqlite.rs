#![doc = "SQLite row source: reads the entry/download join and scores from a ZXDB database file."]
//
//! # SQLite Row Source (CLI <-> Core)
//!
//! This module provides the concrete [`RowSource`] the CLI hands to
//! [`zxdb_export_core::generate::generate`]. The database is opened read-only,
//! so a wrong path fails instead of silently creating an empty database.
//!
//! rusqlite is blocking; every query runs on tokio's blocking pool.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags};
use zxdb_export_core::contract::{FlatRow, RowSource, RowSourceError, ScoreRow};

/// One row per (entry, download file), ordered by entry id then download id.
pub const ROWS_QUERY: &str = "
    select
        e.id,
        e.title,
        gt.text,
        mt.text,
        d.file_link,
        d.file_size,
        ft.text
    from
        entries e
        inner join genretypes gt on e.genretype_id = gt.id
        inner join machinetypes mt on e.machinetype_id = mt.id
        inner join downloads d on e.id = d.entry_id
        inner join filetypes ft on ft.id = d.filetype_id
    order by e.id, d.id
";

/// One row per entry. ZXDB keeps a score per (website, entry); the highest wins.
pub const DEFAULT_SCORE_QUERY: &str =
    "select entry_id, max(score) from scores group by entry_id order by entry_id";

pub struct SqliteRowSource {
    database: PathBuf,
    score_query: Option<String>,
}

impl SqliteRowSource {
    /// `score_query` of `None` means this source provides no scores.
    pub fn new(database: impl Into<PathBuf>, score_query: Option<String>) -> Self {
        Self {
            database: database.into(),
            score_query,
        }
    }

    pub fn database(&self) -> &Path {
        &self.database
    }
}

fn open(database: &Path) -> Result<Connection, RowSourceError> {
    Connection::open_with_flags(database, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|e| {
        tracing::error!(error = ?e, database = %database.display(), "Failed to open database");
        format!("failed to open {}: {e}", database.display()).into()
    })
}

fn query_rows(database: &Path) -> Result<Vec<FlatRow>, RowSourceError> {
    let conn = open(database)?;
    let mut stmt = conn.prepare(ROWS_QUERY)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(FlatRow {
                entry_id: row.get(0)?,
                title: row.get(1)?,
                genre: row.get(2)?,
                machine: row.get(3)?,
                file_link: row.get(4)?,
                file_size: row.get(5)?,
                file_type: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    tracing::info!(rows = rows.len(), database = %database.display(), "Queried entry rows");
    Ok(rows)
}

fn query_scores(database: &Path, query: &str) -> Result<Vec<ScoreRow>, RowSourceError> {
    let conn = open(database)?;
    let mut stmt = conn.prepare(query)?;
    let scores = stmt
        .query_map([], |row| {
            Ok(ScoreRow {
                entry_id: row.get(0)?,
                score: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    tracing::info!(scores = scores.len(), "Queried scores");
    Ok(scores)
}

#[async_trait]
impl RowSource for SqliteRowSource {
    async fn fetch_rows(&self) -> Result<Vec<FlatRow>, RowSourceError> {
        let database = self.database.clone();
        tokio::task::spawn_blocking(move || query_rows(&database)).await?
    }

    async fn fetch_scores(&self) -> Result<Option<Vec<ScoreRow>>, RowSourceError> {
        let Some(query) = self.score_query.clone() else {
            return Ok(None);
        };
        let database = self.database.clone();
        let scores = tokio::task::spawn_blocking(move || query_scores(&database, &query)).await??;
        Ok(Some(scores))
    }
}
