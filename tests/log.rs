use crate::common::command::{repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn log_prints_the_initial_commit(repository_dir: TempDir) {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();
    let initial_hash = common::read_branch(dir.path(), "main");

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==="))
        .stdout(predicate::str::contains(format!("commit {initial_hash}")))
        .stdout(predicate::str::contains("Date: "))
        .stdout(predicate::str::contains("initial commit"));
}

#[rstest]
fn log_walks_the_first_parent_chain_head_first(repository_dir: TempDir) {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "A\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "first change"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "AA\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "second change"])
        .assert()
        .success();

    let output = run_gitlet_command(dir.path(), &["log"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let second = stdout.find("second change").expect("second change missing");
    let first = stdout.find("first change").expect("first change missing");
    let initial = stdout.find("initial commit").expect("initial commit missing");
    assert!(second < first && first < initial, "log order is wrong");
}

#[rstest]
fn global_log_lists_every_commit(repository_dir: TempDir) {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "A\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "on main"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("on main"));
}

#[rstest]
fn find_prints_hashes_of_matching_commits(repository_dir: TempDir) {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("a.txt"), "A\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "add the a file"])
        .assert()
        .success();
    let commit_hash = common::read_branch(dir.path(), "main");

    run_gitlet_command(dir.path(), &["find", "the a file"])
        .assert()
        .success()
        .stdout(predicate::str::contains(commit_hash));
}

#[rstest]
fn find_with_no_match_fails(repository_dir: TempDir) {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    run_gitlet_command(dir.path(), &["find", "no such message"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Found no commit with that message.",
        ));
}
