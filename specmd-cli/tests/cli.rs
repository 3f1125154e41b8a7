use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn spec(dir: &Path) -> PathBuf {
    fs::write(dir.join("types.md"), "# Types\n\n## Scalars\n").unwrap();
    let index = dir.join("index.md");
    fs::write(&index, "# Spec\n\n# Intro\n\nHello.\n\n# [Types](types.md)\n").unwrap();
    index
}

#[test]
fn prints_outline_by_default() {
    let dir = TempDir::new().unwrap();
    let index = spec(dir.path());

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index);

    cmd.assert().success().stdout(
        predicate::str::contains("Document \"Spec\"")
            .and(predicate::str::contains("Section 1 \"Intro\" #sec-Intro"))
            .and(predicate::str::contains("Section 2.1 \"Scalars\" #sec-Scalars")),
    );
}

#[test]
fn prints_biblio_with_seed() {
    let dir = TempDir::new().unwrap();
    let index = spec(dir.path());
    let seed = dir.path().join("seed.json");
    fs::write(&seed, r##"{"https://other.example/": {"sec-Other": "#sec-Other"}}"##).unwrap();

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index).arg("--format").arg("biblio").arg("--biblio").arg(&seed);

    cmd.assert().success().stdout(
        predicate::str::contains("\"sec-Types\": \"#sec-Types\"")
            .and(predicate::str::contains("\"sec-Other\": \"https://other.example/#sec-Other\"")),
    );
}

#[test]
fn prints_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let index = spec(dir.path());

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index).arg("-f").arg("json").arg("--sequential");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"node_type\": \"Document\""));
}

#[test]
fn config_file_sets_prefix() {
    let dir = TempDir::new().unwrap();
    let index = spec(dir.path());
    let config = dir.path().join("specmd.toml");
    fs::write(&config, "[anchors]\nsection_prefix = \"s-\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index).arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#s-Intro"));
}

#[test]
fn reports_missing_import() {
    let dir = TempDir::new().unwrap();
    let index = dir.path().join("index.md");
    fs::write(&index, "# Spec\n\n# [Gone](gone.md)\n").unwrap();

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Import error").and(predicate::str::contains("gone.md")));
}

#[test]
fn rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let index = spec(dir.path());

    let mut cmd = cargo_bin_cmd!("specmd");
    cmd.arg(&index).arg("--format").arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'html' not supported"));
}
