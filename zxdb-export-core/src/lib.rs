#![doc = "zxdb-export-core: core logic library for zxdb-export."]

//! This crate turns the flat rows of a ZXDB export into the static catalog
//! served by the front end: per-entry records, a global title index, per-letter
//! paginated page files, full and search bundles, and a sitemap.
//!
//! Database access and the command line live in the `zxdb-export` crate; this
//! crate only sees rows through the [`contract::RowSource`] trait.
//!
//! # Usage
//! Call [`generate::generate`] with a [`config::GenerateConfig`] and any
//! `RowSource` implementation, or use the individual stages directly.

pub mod aggregate;
pub mod bundle;
pub mod classify;
pub mod clean;
pub mod compress;
pub mod config;
pub mod contract;
pub mod error;
pub mod generate;
pub mod index;
pub mod ordering;
pub mod output;
pub mod paginate;
pub mod sitemap;

/// Maximum number of entries in one page file.
pub const ITEMS_PER_PAGE: usize = 50;
