//! Reference management
//!
//! Branch refs are single-line files under `.gitlet/refs/heads/<name>`
//! holding a 40-hex commit hash. HEAD holds the repo-relative *path* of the
//! active branch file, not a commit hash, so repointing HEAD is one small
//! file write. Text ref files carry a trailing newline and are trimmed on
//! read; remote registrations live in a serde_json map at `.gitlet/REMOTE`.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug)]
pub struct Refs {
    gitlet_path: Box<Path>,
}

impl Refs {
    pub fn new(gitlet_path: Box<Path>) -> Self {
        Refs { gitlet_path }
    }

    pub fn head_path(&self) -> PathBuf {
        self.gitlet_path.join("HEAD")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.gitlet_path.join("refs").join("heads")
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.gitlet_path.join("refs").join("remotes")
    }

    pub fn remote_registry_path(&self) -> PathBuf {
        self.gitlet_path.join("REMOTE")
    }

    pub fn branch_path(&self, name: &str) -> PathBuf {
        self.heads_path().join(name)
    }

    /// The repo-relative path stored in HEAD, e.g. `.gitlet/refs/heads/main`.
    pub fn read_head_target(&self) -> anyhow::Result<String> {
        let head = std::fs::read_to_string(self.head_path())
            .with_context(|| format!("failed to read HEAD file at {:?}", self.head_path()))?;

        Ok(head.trim_end_matches('\n').to_string())
    }

    /// Name of the branch HEAD currently points at.
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let target = self.read_head_target()?;
        let name = Path::new(&target)
            .file_name()
            .with_context(|| format!("HEAD names no branch file: '{target}'"))?;

        Ok(name.to_string_lossy().to_string())
    }

    /// Repoint HEAD at a branch.
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        let target = Path::new(".gitlet")
            .join("refs")
            .join("heads")
            .join(branch);
        Self::write_ref_line(&self.head_path(), &target.to_string_lossy())
            .context("failed to update HEAD")
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    /// Head commit hash of a branch. A missing ref file surfaces as a
    /// not-found I/O error for the caller to map.
    pub fn read_branch(&self, name: &str) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);
        let contents = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch ref at {}", branch_path.display()))?;

        ObjectId::try_parse(contents.trim_end_matches('\n'))
            .with_context(|| format!("branch ref '{name}' holds no valid commit hash"))
    }

    pub fn write_branch(&self, name: &str, commit_id: &ObjectId) -> anyhow::Result<()> {
        Self::write_ref_line(&self.branch_path(name), commit_id.as_ref())
            .with_context(|| format!("failed to write branch ref '{name}'"))
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        std::fs::remove_file(self.branch_path(name))
            .with_context(|| format!("failed to delete branch ref '{name}'"))
    }

    /// Sorted names of all local branches.
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let entries = std::fs::read_dir(self.heads_path())
            .with_context(|| format!("failed to list branches in {:?}", self.heads_path()))?;

        let mut branches = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                branches.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        branches.sort();

        Ok(branches)
    }

    /// Head commit of the current branch.
    pub fn head_commit_id(&self) -> anyhow::Result<ObjectId> {
        self.read_branch(&self.current_branch()?)
    }

    /// Advance the current branch ref; HEAD itself stays put.
    pub fn advance_head_branch(&self, commit_id: &ObjectId) -> anyhow::Result<()> {
        self.write_branch(&self.current_branch()?, commit_id)
    }

    pub fn read_remotes(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let registry_path = self.remote_registry_path();
        let data = std::fs::read(&registry_path).with_context(|| {
            format!("failed to read remote registry at {}", registry_path.display())
        })?;

        serde_json::from_slice(&data).context("failed to parse remote registry")
    }

    pub fn write_remotes(&self, remotes: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let data = serde_json::to_vec(remotes).context("failed to serialize remote registry")?;
        std::fs::write(self.remote_registry_path(), data)
            .context("failed to write remote registry")
    }

    fn write_ref_line(path: &Path, line: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create parent directories for {}", path.display())
            })?;
        }
        std::fs::write(path, format!("{line}\n"))
            .with_context(|| format!("failed to write ref file at {}", path.display()))?;

        Ok(())
    }
}
