#![allow(dead_code)]

pub mod command;
pub mod file;

use std::path::Path;

/// Read a ref-style text file (HEAD, branch refs), trimming the trailing
/// newline.
pub fn read_ref_file(path: &Path) -> String {
    let contents = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("cannot read ref file {}: {err}", path.display()));
    contents.trim_end_matches('\n').to_string()
}

pub fn read_head(dir: &Path) -> String {
    read_ref_file(&dir.join(".gitlet").join("HEAD"))
}

pub fn read_branch(dir: &Path, name: &str) -> String {
    read_ref_file(&dir.join(".gitlet").join("refs").join("heads").join(name))
}

pub fn objects_dir(dir: &Path) -> std::path::PathBuf {
    dir.join(".gitlet").join("objects")
}

pub fn object_exists(dir: &Path, hash: &str) -> bool {
    objects_dir(dir).join(hash).is_file()
}

pub fn object_count(dir: &Path) -> usize {
    std::fs::read_dir(objects_dir(dir))
        .expect("cannot list objects directory")
        .count()
}

/// Parse the INDEX file into its JSON map.
pub fn read_index(dir: &Path) -> serde_json::Value {
    let bytes = std::fs::read(dir.join(".gitlet").join("INDEX")).expect("cannot read INDEX");
    serde_json::from_slice(&bytes).expect("INDEX is not valid JSON")
}

pub fn index_entry_hash(dir: &Path, name: &str) -> Option<String> {
    read_index(dir)
        .get(name)?
        .get("hash")
        .and_then(|hash| hash.as_str())
        .map(str::to_string)
}

/// Read a commit blob by hash and parse its payload.
pub fn read_commit_object(dir: &Path, hash: &str) -> serde_json::Value {
    let bytes = std::fs::read(objects_dir(dir).join(hash))
        .unwrap_or_else(|err| panic!("cannot read commit object {hash}: {err}"));
    let delim = bytes
        .iter()
        .position(|&byte| byte == 0)
        .expect("object has no header delimiter");
    assert_eq!(&bytes[..delim], b"commit", "object {hash} is not a commit");
    serde_json::from_slice(&bytes[delim + 1..]).expect("commit payload is not valid JSON")
}

/// The files map of the commit a branch points at.
pub fn branch_snapshot(dir: &Path, branch: &str) -> serde_json::Value {
    let head = read_branch(dir, branch);
    read_commit_object(dir, &head)["files"].clone()
}
