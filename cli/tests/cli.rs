//! CLI contract tests for the `quarry` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn quarry() -> assert_cmd::Command {
    cargo_bin_cmd!("quarry")
}

fn write_corpus(raw: &Path) {
    fs::create_dir_all(raw).expect("mkdir raw");
    fs::write(raw.join("pets.txt"), "Cats and dogs.").expect("write pets");
    fs::write(raw.join("birds.txt"), "Dogs chase birds.").expect("write birds");
}

#[test]
fn preprocess_then_boolean_search() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let raw = tmp.path().join("raw");
    let processed = tmp.path().join("processed");
    write_corpus(&raw);

    quarry()
        .args([
            "preprocess",
            "--raw",
            raw.to_str().unwrap(),
            "--processed",
            processed.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("processed 2 documents"));

    let pets = fs::read_to_string(processed.join("pets.txt")).expect("read pets");
    assert_eq!(pets, "cat dog");

    // "and" acts as the boolean connective, the operands match stemmed terms.
    quarry()
        .args([
            "search",
            "--corpus",
            processed.to_str().unwrap(),
            "--model",
            "boolean",
            "cat",
            "and",
            "dog",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 matching document(s)")
                .and(predicate::str::contains("pets.txt")),
        );
}

#[test]
fn vsm_search_prints_ranked_table() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let raw = tmp.path().join("raw");
    let processed = tmp.path().join("processed");
    write_corpus(&raw);

    quarry()
        .args([
            "preprocess",
            "--raw",
            raw.to_str().unwrap(),
            "--processed",
            processed.to_str().unwrap(),
        ])
        .assert()
        .success();

    quarry()
        .args([
            "search",
            "--corpus",
            processed.to_str().unwrap(),
            "--model",
            "vsm",
            "birds",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("rank")
                .and(predicate::str::contains("birds.txt"))
                .and(predicate::str::contains("pets.txt")),
        );
}

#[test]
fn vsm_search_json_top_1_is_the_matching_doc() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let raw = tmp.path().join("raw");
    let processed = tmp.path().join("processed");
    write_corpus(&raw);

    quarry()
        .args([
            "preprocess",
            "--raw",
            raw.to_str().unwrap(),
            "--processed",
            processed.to_str().unwrap(),
        ])
        .assert()
        .success();

    // Only birds.txt contains "bird", so with k = 1 it must be the sole hit.
    quarry()
        .args([
            "search",
            "--corpus",
            processed.to_str().unwrap(),
            "--model",
            "vsm",
            "--top-k",
            "1",
            "--json",
            "birds",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("birds.txt")
                .and(predicate::str::contains("pets.txt").not()),
        );
}

#[test]
fn unknown_weighting_scheme_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");

    quarry()
        .args([
            "search",
            "--corpus",
            tmp.path().to_str().unwrap(),
            "--scheme",
            "tfidf",
            "anything",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weighting scheme"));
}

#[test]
fn eval_reports_both_models_and_means() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let raw = tmp.path().join("raw");
    let processed = tmp.path().join("processed");
    write_corpus(&raw);

    quarry()
        .args([
            "preprocess",
            "--raw",
            raw.to_str().unwrap(),
            "--processed",
            processed.to_str().unwrap(),
        ])
        .assert()
        .success();

    let judgments = tmp.path().join("judgments.json");
    fs::write(
        &judgments,
        r#"{"cat and dog": ["pets.txt"], "birds": ["birds.txt"]}"#,
    )
    .expect("write judgments");

    quarry()
        .args([
            "eval",
            "--corpus",
            processed.to_str().unwrap(),
            "--judgments",
            judgments.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("boolean retrieval")
                .and(predicate::str::contains("standard scheme"))
                .and(predicate::str::contains("sublinear scheme"))
                .and(predicate::str::contains("mean")),
        );
}

#[test]
fn preprocess_missing_raw_dir_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");

    quarry()
        .args([
            "preprocess",
            "--raw",
            tmp.path().join("absent").to_str().unwrap(),
            "--processed",
            tmp.path().join("out").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("raw corpus directory not found"));
}
