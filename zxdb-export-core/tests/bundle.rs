use std::collections::{HashMap, HashSet};

use serde_json::Value;
use zxdb_export_core::aggregate::aggregate;
use zxdb_export_core::bundle::build_bundles;
use zxdb_export_core::contract::{FlatRow, ScoreRow};
use zxdb_export_core::index::build_index;

fn rows() -> Vec<FlatRow> {
    let data = [
        (1, "Manic Miner", "Platform", "/mm.tzx"),
        (1, "Manic Miner", "Platform", "/mm.z80"),
        (2, "jetpac", "Shoot-em-up", "/jp.tap"),
        (3, "3D Deathchase", "Arcade", "/dc.tap"),
        (4, "Manic Miner", "Platform", "/mm-remake.tap"),
        (5, "Knight Lore", "Adventure", "/kl.tzx"),
    ];
    data.iter()
        .map(|(id, title, genre, link)| FlatRow {
            entry_id: *id,
            title: title.to_string(),
            genre: genre.to_string(),
            machine: "ZX-Spectrum 48K".into(),
            file_link: link.to_string(),
            file_size: None,
            file_type: "Tape image".into(),
        })
        .collect()
}

#[test]
fn test_bundles_share_index_ids_order_and_buckets() {
    let catalog = aggregate(
        rows(),
        Some(vec![ScoreRow {
            entry_id: 5,
            score: 8.3,
        }]),
    )
    .unwrap();
    let index = build_index(&catalog);
    let bundles = build_bundles(&catalog);

    let index_ids: Vec<i64> = index.iter().map(|e| e.id).collect();
    let full_ids: Vec<i64> = bundles.full.iter().map(|e| e.entry.id).collect();
    let search_ids: Vec<i64> = bundles.search.iter().map(|e| e.id).collect();
    assert_eq!(full_ids, index_ids);
    assert_eq!(search_ids, index_ids);

    let index_buckets: HashMap<i64, _> = index.iter().map(|e| (e.id, e.bucket)).collect();
    for full in &bundles.full {
        assert_eq!(full.bucket, index_buckets[&full.entry.id]);
    }
    for search in &bundles.search {
        assert_eq!(search.bucket, index_buckets[&search.id]);
    }
}

#[test]
fn test_duplicate_titles_keep_their_own_bucket_and_files() {
    let catalog = aggregate(rows(), None).unwrap();
    let bundles = build_bundles(&catalog);

    let miners: Vec<_> = bundles
        .full
        .iter()
        .filter(|e| e.entry.title == "Manic Miner")
        .collect();
    assert_eq!(miners.len(), 2);
    assert_eq!(miners[0].entry.id, 1);
    assert_eq!(miners[0].entry.files.len(), 2);
    assert_eq!(miners[1].entry.id, 4);
    assert_eq!(miners[1].entry.files.len(), 1);
    assert!(miners.iter().all(|e| e.bucket.as_char() == 'M'));
}

#[test]
fn test_bundle_json_uses_short_keys_and_reduced_search_fields() {
    let catalog = aggregate(
        rows(),
        Some(vec![ScoreRow {
            entry_id: 5,
            score: 8.3,
        }]),
    )
    .unwrap();
    let bundles = build_bundles(&catalog);

    let full: Value = serde_json::to_value(&bundles.full).unwrap();
    let search: Value = serde_json::to_value(&bundles.search).unwrap();

    let full_keys: HashSet<&str> = full[0].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(full_keys, HashSet::from(["i", "t", "g", "m", "sc", "f", "l"]));

    let search_keys: HashSet<&str> = search[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(search_keys, HashSet::from(["i", "t", "g", "m", "l", "f"]));

    let file_keys: HashSet<&str> = search[0]["f"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(file_keys, HashSet::from(["l", "y", "s"]));

    let knight = full
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["i"] == 5)
        .unwrap();
    assert_eq!(knight["sc"], 8.3);
    assert_eq!(knight["l"], "K");
}

#[test]
fn test_bundles_of_empty_catalog_are_empty() {
    let catalog = aggregate(Vec::new(), None).unwrap();
    let bundles = build_bundles(&catalog);
    assert!(bundles.full.is_empty());
    assert!(bundles.search.is_empty());
    assert_eq!(serde_json::to_string(&bundles.full).unwrap(), "[]");
}
