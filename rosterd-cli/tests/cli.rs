//! CLI surface tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_serve() {
    Command::cargo_bin("rosterd")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn version_prints() {
    Command::cargo_bin("rosterd")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rosterd"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("rosterd")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
