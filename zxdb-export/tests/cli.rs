mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, database: &Path, output: &Path, scores: bool) -> std::path::PathBuf {
    let config = dir.join("zxdb-export.yaml");
    fs::write(
        &config,
        format!(
            "source:\n  database: {}\n  scores: {scores}\noutput:\n  dir: {}\n  base_url: https://zx.example.org\n",
            database.display(),
            output.display()
        ),
    )
    .expect("Writing temp config failed");
    config
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn generate_cli_happy_flow_writes_dataset() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("zxdb.sqlite");
    let out = tmp.path().join("data");
    common::create_fixture_db(&db, true);
    let config = write_config(tmp.path(), &db, &out, true);

    let mut cmd = Command::cargo_bin("zxdb-export").expect("Binary exists");
    cmd.arg("generate")
        .arg("--config")
        .arg(&config)
        .env_remove("ZXDB_DATABASE")
        .env_remove("ZXDB_OUTPUT_DIR");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated 4 entries"))
        .stdout(predicate::str::contains("A/ with 1 pages (1 entries)"))
        .stdout(predicate::str::contains("complete.json"));

    let index = read_json(&out.join("index.json"));
    assert_eq!(
        index,
        serde_json::json!([
            {"i": 3, "t": "3D Tanx", "l": "_", "p": 1},
            {"i": 1, "t": "Abex", "l": "A", "p": 1},
            {"i": 4, "t": "Knight Lore", "l": "K", "p": 1},
            {"i": 2, "t": "zen", "l": "Z", "p": 1},
        ])
    );

    let page = read_json(&out.join("A").join("1.json"));
    assert_eq!(page[0]["sc"], 6.5);
    assert_eq!(page[0]["f"].as_array().unwrap().len(), 2);
    assert_eq!(page[0]["f"][1]["s"], Value::Null);
    assert_eq!(read_json(&out.join("Z").join("info.json")), serde_json::json!({"p": 1}));
    assert!(out.join("search.json.gz").exists());

    let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
    assert_eq!(sitemap.matches("<url>").count(), 5);
}

#[test]
fn generate_cli_flags_override_config_paths() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("zxdb.sqlite");
    let out = tmp.path().join("elsewhere");
    common::create_fixture_db(&db, false);
    let config = write_config(
        tmp.path(),
        &tmp.path().join("wrong.sqlite"),
        &tmp.path().join("unused"),
        false,
    );

    let mut cmd = Command::cargo_bin("zxdb-export").expect("Binary exists");
    cmd.arg("generate")
        .arg("--config")
        .arg(&config)
        .arg("--database")
        .arg(&db)
        .arg("--output")
        .arg(&out)
        .env_remove("ZXDB_DATABASE")
        .env_remove("ZXDB_OUTPUT_DIR");

    cmd.assert().success();
    assert!(out.join("index.json").exists());
    assert!(!tmp.path().join("unused").exists());
}

#[test]
fn generate_cli_fails_for_missing_database() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("data");
    let config = write_config(tmp.path(), &tmp.path().join("missing.sqlite"), &out, true);

    let mut cmd = Command::cargo_bin("zxdb-export").expect("Binary exists");
    cmd.arg("generate")
        .arg("--config")
        .arg(&config)
        .env_remove("ZXDB_DATABASE")
        .env_remove("ZXDB_OUTPUT_DIR");

    let output = cmd.assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("[ERROR] Generation failed").count(),
        1,
        "Failure is reported once, got: {stderr}"
    );
    assert!(stderr.contains("missing.sqlite"));
    assert!(!stderr.contains("\nError: "));
    assert!(!out.exists(), "No output is written when the row source fails");
}
