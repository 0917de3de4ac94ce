//! Integration tests for folder-contents

mod harness;

use harness::{contents, TestDir};
use predicates::prelude::*;

#[test]
fn test_extracts_file_and_skips_node_modules() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");
    dir.add_file("node_modules/x.txt", "vendored");

    contents(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File contents extracted to extracted_contents.txt",
        ));

    assert_eq!(
        dir.read("extracted_contents.txt"),
        "--- File: ./a.txt ---\nhello\n\n"
    );
}

#[test]
fn test_excluded_file_names_get_no_header() {
    let dir = TestDir::new();
    dir.add_file("package-lock.json", "{}");
    dir.add_file(".gitignore", "dist");
    dir.add_file("src/tsconfig.json", "{}");
    dir.add_file("src/main.ts", "export {}");

    contents(&dir).assert().success();

    let output = dir.read("extracted_contents.txt");
    assert!(output.contains("--- File: ./src/main.ts ---"));
    assert!(!output.contains("package-lock.json"));
    assert!(!output.contains(".gitignore"));
    assert!(!output.contains("tsconfig.json"));
}

#[test]
fn test_undecodable_file_is_reported_and_skipped() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "alpha");
    dir.add_bytes("image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
    dir.add_file("z.txt", "omega");

    contents(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not read ./image.png"));

    let output = dir.read("extracted_contents.txt");
    assert!(!output.contains("image.png"));
    assert!(output.contains("--- File: ./a.txt ---\nalpha\n\n"));
    assert!(output.contains("--- File: ./z.txt ---\nomega\n\n"));
}

#[test]
fn test_does_not_ingest_previous_outputs() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");
    dir.add_file("folder_tree.txt", "stale tree");

    contents(&dir).assert().success();
    contents(&dir).assert().success();

    let output = dir.read("extracted_contents.txt");
    assert!(!output.contains("extracted_contents.txt"));
    assert!(!output.contains("stale tree"));
}

#[test]
fn test_custom_output_name_is_not_reingested() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");

    contents(&dir).args(["--output", "dump.txt"]).assert().success();
    contents(&dir).args(["--output", "dump.txt"]).assert().success();

    assert_eq!(dir.read("dump.txt"), "--- File: ./a.txt ---\nhello\n\n");
    assert!(!dir.exists("extracted_contents.txt"));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = TestDir::new();
    dir.add_file("src/b.rs", "b");
    dir.add_file("src/a.rs", "a");
    dir.add_file("docs/guide.md", "# guide");
    dir.add_file("README.md", "readme");

    contents(&dir).assert().success();
    let first = dir.read_bytes("extracted_contents.txt");
    contents(&dir).assert().success();
    let second = dir.read_bytes("extracted_contents.txt");

    assert_eq!(first, second);
}

#[test]
fn test_extra_exclusions_from_flags() {
    let dir = TestDir::new();
    dir.add_file("keep.txt", "keep");
    dir.add_file("dist/bundle.js", "minified");
    dir.add_file(".env", "SECRET=1");

    contents(&dir)
        .args(["--exclude-dir", "dist", "--exclude-file", ".env"])
        .assert()
        .success();

    let output = dir.read("extracted_contents.txt");
    assert!(output.contains("keep"));
    assert!(!output.contains("bundle.js"));
    assert!(!output.contains("SECRET"));
}

#[test]
fn test_explicit_root_argument() {
    let dir = TestDir::new();
    dir.add_file("project/lib.rs", "pub fn f() {}");
    dir.add_file("outside.txt", "not part of the root");

    contents(&dir).arg("project").assert().success();

    let output = dir.read("extracted_contents.txt");
    assert_eq!(output, "--- File: project/lib.rs ---\npub fn f() {}\n\n");
}

#[test]
fn test_missing_root_fails() {
    let dir = TestDir::new();

    contents(&dir)
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!dir.exists("extracted_contents.txt"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");

    contents(&dir)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 files would be extracted"));

    assert!(!dir.exists("extracted_contents.txt"));
}

#[test]
fn test_json_report() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");

    contents(&dir)
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tool\": \"folder-contents\""))
        .stdout(predicate::str::contains("\"files\": 1"));
}

#[test]
fn test_config_file_is_picked_up() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");
    dir.add_file("generated/out.txt", "generated");
    dir.add_file(
        "foldertools.toml",
        "[contents]\noutput_file = \"all.txt\"\n\n[contents.exclusions]\ndirs = [\"generated\"]\nfiles = [\"foldertools.toml\"]\n",
    );

    contents(&dir).assert().success();

    assert_eq!(dir.read("all.txt"), "--- File: ./a.txt ---\nhello\n\n");
}

#[test]
fn test_config_with_only_output_file_keeps_default_exclusions() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "hello");
    dir.add_file("package-lock.json", "{}");
    dir.add_file("foldertools.toml", "[contents]\noutput_file = \"all.txt\"\n");

    contents(&dir).assert().success();

    let output = dir.read("all.txt");
    assert!(output.contains("--- File: ./a.txt ---\nhello\n\n"));
    assert!(!output.contains("package-lock.json"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TestDir::new();
    dir.add_file("foldertools.toml", "[contents\nbroken");

    contents(&dir)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Configuration error"));
}
