mod common;

use assert_cmd::Command;
use assert_fs::TempDir;
use common::{git_fixture, numbered_lines, GitFixture};
use predicates::prelude::*;
use rstest::rstest;

fn run(args: &[&str]) -> assert_cmd::assert::Assert {
    Command::cargo_bin("git-range-history")
        .expect("binary should build")
        .env_remove("RUST_LOG")
        .args(args)
        .assert()
}

#[rstest]
fn prints_the_commit_that_changed_the_range(mut git_fixture: GitFixture) {
    let mut lines = numbered_lines(1..=10);
    git_fixture.commit("notes.txt", Some(lines.concat().as_str()), "Create notes");
    lines[3] = "line four\n".to_string();
    let c2 = git_fixture.commit("notes.txt", Some(lines.concat().as_str()), "Spell out four");

    let file = git_fixture.path("notes.txt");
    run(&[file.to_str().unwrap(), "--start", "3", "--end", "5"])
        .success()
        .stdout(predicate::str::contains(format!("commit: {c2}")))
        .stdout(predicate::str::contains("author: Ada Lovelace"))
        .stdout(predicate::str::contains("summary: Spell out four"))
        .stdout(predicate::str::contains("-line 4\n+line four\n"));
}

#[rstest]
fn reports_when_nothing_changes_the_range(mut git_fixture: GitFixture) {
    let c1 = git_fixture.commit("notes.txt", Some("one\ntwo\n"), "Create notes");

    let file = git_fixture.path("notes.txt");
    run(&[file.to_str().unwrap(), "--direction", "newer", "--anchor", c1.as_str()])
        .success()
        .stdout(predicate::str::contains("No git history found for selection."));
}

#[test]
fn fails_outside_a_repository() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("loose.txt");
    std::fs::write(&file, "loose\n").unwrap();

    run(&[file.to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("no git repository encloses"));
}

#[rstest]
fn rejects_inverted_ranges(mut git_fixture: GitFixture) {
    git_fixture.commit("notes.txt", Some("one\ntwo\n"), "Create notes");

    let file = git_fixture.path("notes.txt");
    run(&[file.to_str().unwrap(), "--start", "5", "--end", "2"])
        .failure()
        .stderr(predicate::str::contains("invalid line range 5-2"));
}

#[test]
fn start_requires_end() {
    run(&["notes.txt", "--start", "5"]).failure();
}
