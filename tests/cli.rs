mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn forge() -> Command {
    Command::cargo_bin("csv-forge").expect("binary exists")
}

#[test]
fn generate_writes_a_csv_with_header_and_rows() {
    let workspace = TestWorkspace::new();
    let spec = workspace.write(
        "columns.yml",
        "- name: id\n  type: id\n  options:\n    prefix: \"U-\"\n    startAt: 100\n\
         - name: plan\n  type: oneOf\n  options:\n    values: [free, pro]\n",
    );
    let output = workspace.path().join("out.csv");

    forge()
        .args([
            "generate",
            "-s",
            spec.to_str().unwrap(),
            "--rows",
            "3",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = workspace.read("out.csv");
    let lines: Vec<&str> = written.trim_end().lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "id,plan");
    assert!(lines[1].starts_with("\"U-100\","));
    assert!(lines[3].starts_with("\"U-102\","));
}

#[test]
fn generate_rejects_out_of_range_row_counts() {
    let workspace = TestWorkspace::new();
    let spec = workspace.write("columns.yml", "- name: id\n  type: id\n");
    forge()
        .args(["generate", "-s", spec.to_str().unwrap(), "--rows", "0"])
        .assert()
        .failure()
        .stderr(contains("Row count"));
}

#[test]
fn map_transforms_a_csv_through_a_mapping_file() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", "first,last\njohn,doe\nada,lovelace\n");
    let mappings = workspace.write(
        "mappings.yml",
        "- sourceField: first\n  targetField: FIRST\n  transformation: toUpperCase\n",
    );
    let output = workspace.path().join("mapped.csv");

    forge()
        .args([
            "map",
            "-i",
            input.to_str().unwrap(),
            "-m",
            mappings.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = workspace.read("mapped.csv");
    assert_eq!(written.trim_end(), "FIRST\n\"JOHN\"\n\"ADA\"");
}

#[test]
fn map_fails_cleanly_on_an_empty_mapping_list() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("people.csv", "a\n1\n");
    let mappings = workspace.write("mappings.yml", "[]\n");
    forge()
        .args([
            "map",
            "-i",
            input.to_str().unwrap(),
            "-m",
            mappings.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("mapping"));
}

#[test]
fn stats_prints_an_aligned_table() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("scores.csv", "name,score\nalice,10\nbob,14\n");
    forge()
        .args(["stats", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("column")
                .and(contains("unique"))
                .and(contains("Number"))
                .and(contains("12")),
        );
}

#[test]
fn stats_rejects_unknown_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("scores.csv", "name\nalice\n");
    forge()
        .args(["stats", "-i", input.to_str().unwrap(), "-C", "ghost"])
        .assert()
        .failure()
        .stderr(contains("ghost"));
}

#[test]
fn convert_reads_stdin_and_rewrites_delimiters() {
    forge()
        .args(["convert", "-i", "-", "--output-delimiter", ";", "--no-quotes"])
        .write_stdin("a,b\n1,\"x,y\"\n")
        .assert()
        .success()
        .stdout(contains("a;b").and(contains("1;x,y")));
}

#[test]
fn transforms_lists_the_catalog_with_labels() {
    forge()
        .arg("transforms")
        .assert()
        .success()
        .stdout(contains("toUpperCase").and(contains("To Upper Case")));
}
