use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit tracking `a.txt` and `b.txt`.
#[fixture]
pub fn committed_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(repository_dir.path().join("a.txt"), "A\n"));
    write_file(FileSpec::new(repository_dir.path().join("b.txt"), "B\n"));

    run_gitlet_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["commit", "base commit"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
