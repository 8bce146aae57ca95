use crate::common::command::{committed_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn reset_moves_the_branch_and_rewrites_the_tree(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let base_hash = common::read_branch(dir.path(), "main");

    write_file(FileSpec::new(dir.path().join("a.txt"), "newer A\n"));
    write_file(FileSpec::new(dir.path().join("c.txt"), "C\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "advance"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["reset", &base_hash])
        .assert()
        .success();

    // The current branch ref moved; HEAD still names main.
    assert_eq!(common::read_branch(dir.path(), "main"), base_hash);
    assert_eq!(common::read_head(dir.path()), ".gitlet/refs/heads/main");
    assert_eq!(read_file(&dir.path().join("a.txt")), "A\n");
    assert!(!dir.path().join("c.txt").exists());
    assert_eq!(common::read_index(dir.path()), serde_json::json!({}));
}

#[rstest]
fn reset_accepts_a_short_hash(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let base_hash = common::read_branch(dir.path(), "main");

    write_file(FileSpec::new(dir.path().join("a.txt"), "newer A\n"));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "advance"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["reset", &base_hash[..10]])
        .assert()
        .success();
    assert_eq!(common::read_branch(dir.path(), "main"), base_hash);
}

#[rstest]
fn reset_to_an_unknown_commit_fails(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_gitlet_command(dir.path(), &["reset", "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn reset_refuses_to_clobber_untracked_files(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let base_hash = common::read_branch(dir.path(), "main");

    // Advance main so c.txt is tracked at the head but not at base.
    write_file(FileSpec::new(dir.path().join("c.txt"), "C\n"));
    run_gitlet_command(dir.path(), &["add", "c.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["commit", "track c"])
        .assert()
        .success();
    let advanced_hash = common::read_branch(dir.path(), "main");

    // Go back to base, then drop an untracked c.txt in the way.
    run_gitlet_command(dir.path(), &["reset", &base_hash])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("c.txt"), "local C\n"));

    run_gitlet_command(dir.path(), &["reset", &advanced_hash])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));
    assert_eq!(read_file(&dir.path().join("c.txt")), "local C\n");
}
