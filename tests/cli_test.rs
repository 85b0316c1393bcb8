//! CLI surface tests
//!
//! These only exercise argument parsing and help output; anything that
//! would reach the network or the terminal stays out of scope here.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_subcommands() {
    Command::cargo_bin("lec")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("quiz")
                .and(predicate::str::contains("roster"))
                .and(predicate::str::contains("student"))
                .and(predicate::str::contains("config")),
        );
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("lec")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lec"));
}

#[test]
fn quiz_requires_a_module() {
    Command::cargo_bin("lec")
        .unwrap()
        .arg("quiz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--module"));
}

#[test]
fn student_requires_an_id() {
    Command::cargo_bin("lec")
        .unwrap()
        .arg("student")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn config_rejects_unknown_keys() {
    Command::cargo_bin("lec")
        .unwrap()
        .args(["config", "get", "no-such-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
