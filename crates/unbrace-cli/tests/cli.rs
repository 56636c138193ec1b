use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn unbrace() -> Command {
    Command::cargo_bin("unbrace").unwrap()
}

#[test]
fn test_literal_prints_count() {
    unbrace()
        .args(["--literal", "}}}{{{}}}}}"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_stdin_by_default() {
    unbrace()
        .write_stdin("{}{}{}")
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_empty_stdin() {
    unbrace().write_stdin("").assert().success().stdout("0\n");
}

#[test]
fn test_letters_count_as_closers() {
    unbrace()
        .args(["--literal", "abc"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_strict_ignores_letters() {
    unbrace()
        .args(["--strict", "--literal", "{abc}}"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_closers_flag() {
    unbrace()
        .args(["--closers", "brace", "--literal", "xyz"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_single_file_prints_bare_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "}}").unwrap();

    unbrace().arg(&path).assert().success().stdout("2\n");
}

#[test]
fn test_multiple_files_are_labelled() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "{}").unwrap();
    fs::write(&b, "}").unwrap();

    unbrace()
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(format!("{}: 0\n{}: 1\n", a.display(), b.display()));
}

#[test]
fn test_check_fails_on_unmatched() {
    unbrace()
        .args(["--check", "--literal", "{\n}}"])
        .assert()
        .code(1)
        .stdout("2\n")
        .stderr(predicate::str::contains("literal:2:1: 2 unmatched closer(s)"));
}

#[test]
fn test_check_passes_when_clean() {
    unbrace()
        .args(["--check", "--literal", "{{}}"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    unbrace()
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_config_from_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("unbrace.toml"), "closers = \"brace\"\n").unwrap();

    unbrace()
        .current_dir(dir.path())
        .args(["--literal", "{ok}"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_explicit_config_with_custom_symbols() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("parens.toml");
    fs::write(&config, "open = \"(\"\nclose = \")\"\nclosers = \"brace\"\n").unwrap();

    unbrace()
        .arg("--config")
        .arg(&config)
        .args(["--literal", "(a)) {}"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "open = \"x\"\nclose = \"x\"\n").unwrap();

    unbrace()
        .arg("--config")
        .arg(&config)
        .args(["--literal", "{}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("open and close must differ"));
}

#[test]
fn test_trace_output() {
    unbrace()
        .args(["--trace", "--literal", "}{"])
        .assert()
        .success()
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::ends_with("total: 1 unmatched, 1 pending\n"));
}

#[test]
fn test_literal_conflicts_with_files() {
    unbrace()
        .args(["--literal", "{}", "a.txt"])
        .assert()
        .code(2);
}

#[test]
fn test_stdin_conflicts_with_files() {
    unbrace()
        .args(["--stdin", "a.txt"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}
