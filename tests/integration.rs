//! Integration tests for dirwalk


use harness::{TestTree, run_dirwalk};

/// A small fixed tree: 5 entries (root, a.txt, b.txt, c, c/d.txt),
/// 35 bytes of regular-file content.
fn known_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file_with_len("a.txt", 10);
    tree.add_file_with_len("b.txt", 20);
    tree.add_file_with_len("c/d.txt", 5);
    tree
}

#[test]
fn test_plain_report_for_known_tree() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (stdout, stderr, code) = run_dirwalk(tree.path(), &[root]);
    assert_eq!(code, Some(0), "dirwalk should succeed: {}", stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![root, "5", "35"]);
}

#[test]
fn test_list_prints_paths_in_traversal_order() {
    let tree = TestTree::new();
    tree.add_file("b.txt", "bb");
    tree.add_file("a.txt", "alpha");
    tree.add_file("sub/z.txt", "zzz");
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "--list"]);
    assert_eq!(code, Some(0));

    let expected = vec![
        root.to_string(),
        tree.path().join("a.txt").display().to_string(),
        tree.path().join("b.txt").display().to_string(),
        tree.path().join("sub").display().to_string(),
        tree.path().join("sub/z.txt").display().to_string(),
        "5".to_string(),
        "10".to_string(),
    ];
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_list_prints_the_root_exactly_once() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "aa");
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "--list"]);
    assert_eq!(code, Some(0));

    let root_lines = stdout.lines().filter(|line| *line == root).count();
    assert_eq!(root_lines, 1, "the root line doubles as its visited entry");
}

#[test]
fn test_empty_directory_counts_only_itself() {
    let tree = TestTree::new();
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root]);
    assert_eq!(code, Some(0));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![root, "1", "0"]);
}

#[test]
fn test_root_may_be_a_single_file() {
    let tree = TestTree::new();
    let file = tree.add_file_with_len("only.bin", 7);
    let file_str = file.to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[file_str]);
    assert_eq!(code, Some(0));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![file_str, "1", "7"]);
}

#[test]
fn test_missing_root_prints_root_line_then_fails() {
    let tree = TestTree::new();
    let ghost = tree.path().join("no-such-dir");
    let ghost_str = ghost.to_str().unwrap();

    let (stdout, stderr, code) = run_dirwalk(tree.path(), &[ghost_str]);
    assert_eq!(code, Some(1));
    assert_eq!(
        stdout,
        format!("{}\n", ghost_str),
        "totals must not appear for a failed walk"
    );
    assert!(stderr.contains("dirwalk: cannot access"), "stderr: {}", stderr);
    assert!(stderr.contains("no-such-dir"));
}

#[test]
fn test_empty_root_is_rejected() {
    let tree = TestTree::new();

    let (stdout, stderr, code) = run_dirwalk(tree.path(), &[""]);
    assert_eq!(code, Some(1));
    assert_eq!(stdout, "\n");
    assert!(stderr.contains("dirwalk: empty root path"), "stderr: {}", stderr);
}

#[test]
fn test_repeated_runs_report_identical_totals() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (first, _, _) = run_dirwalk(tree.path(), &[root]);
    let (second, _, _) = run_dirwalk(tree.path(), &[root]);
    assert_eq!(first, second);
}

#[test]
fn test_hidden_entries_are_counted() {
    let tree = TestTree::new();
    tree.add_file(".hidden", "dotfile");
    tree.add_file(".git/config", "[core]");
    let root = tree.path().to_str().unwrap();

    // root, .git, .git/config, .hidden
    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout.lines().nth(1), Some("4"));
}

#[test]
fn test_no_size_omits_the_total_line() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "--no-size"]);
    assert_eq!(code, Some(0));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![root, "5"]);
}

#[test]
fn test_json_output() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "--json"]);
    assert_eq!(code, Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["root"], root);
    assert_eq!(value["entries"], 5);
    assert_eq!(value["total_bytes"], 35);
    assert_eq!(value["skipped"]["list"], 0);
    assert_eq!(value["skipped"]["metadata"], 0);
    assert!(value.get("paths").is_none(), "paths appear only with --list");
}

#[test]
fn test_json_with_list_includes_paths() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "--json", "--list"]);
    assert_eq!(code, Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let paths = value["paths"].as_array().expect("paths array");
    assert_eq!(paths.len(), 5);
    assert_eq!(paths[0], root);
}

#[test]
fn test_exclude_skips_matching_subtrees() {
    let tree = TestTree::new();
    tree.add_file("src/main.rs", "fn main() {}");
    tree.add_file_with_len("target/debug/app.bin", 1000);
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) = run_dirwalk(tree.path(), &[root, "-e", "^target"]);
    assert_eq!(code, Some(0));

    // root, src, src/main.rs; nothing under target contributes
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "3");
    assert_eq!(lines[2], "12");

    let (listed, _stderr, _code) = run_dirwalk(tree.path(), &[root, "-e", "^target", "--list"]);
    assert!(!listed.contains("target"), "excluded paths must not be listed");
}

#[test]
fn test_exclude_matches_relative_paths_anywhere() {
    let tree = TestTree::new();
    tree.add_file("keep.txt", "k");
    tree.add_file("sub/skip.log", "ssss");
    tree.add_file("skip.log", "ss");
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) =
        run_dirwalk(tree.path(), &[root, "-e", r"\.log$", "--list"]);
    assert_eq!(code, Some(0));
    assert!(!stdout.contains("skip.log"));
    // root, keep.txt, sub
    assert!(stdout.lines().any(|l| l == "3"), "stdout: {}", stdout);
}

#[test]
fn test_invalid_exclude_pattern_errors() {
    let tree = TestTree::new();
    let root = tree.path().to_str().unwrap();

    let (_stdout, stderr, code) = run_dirwalk(tree.path(), &[root, "-e", "["]);
    assert_eq!(code, Some(1));
    assert!(
        stderr.contains("invalid --exclude pattern"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_human_summary_block() {
    let tree = known_tree();
    let root = tree.path().to_str().unwrap();

    let (stdout, _stderr, code) =
        run_dirwalk(tree.path(), &[root, "--human", "--color", "never"]);
    assert_eq!(code, Some(0));

    assert!(stdout.contains("Walk Summary"));
    assert!(stdout.contains("Entries:   5 total"));
    assert!(stdout.contains("(35 bytes)"));
    assert!(stdout.contains("Elapsed:"));
    assert!(!stdout.contains("Skipped:"), "clean run shows no skip row");
}

mod cli_surface {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn test_usage_error_without_path() {
        Command::cargo_bin("dirwalk")
            .unwrap()
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn test_json_and_human_conflict() {
        Command::cargo_bin("dirwalk")
            .unwrap()
            .args([".", "--json", "--human"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("cannot be used with"));
    }

    #[test]
    fn test_help_names_the_policies() {
        Command::cargo_bin("dirwalk")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--on-list-error"))
            .stdout(predicate::str::contains("--on-stat-error"));
    }
}
