//! Working directory operations
//!
//! Tracked paths are flat names in the repository root; directories are
//! never tracked. All user-file deletions funnel through
//! `restricted_delete`, which refuses directories and treats an absent file
//! as already done.

use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Size and mtime of one working-tree file, for the index's cheap
/// first-pass comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified_at: i64,
}

pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Sorted names of the regular files in the repository root. The
    /// `.gitlet` directory falls out with every other directory.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("cannot list working directory {}", self.path.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(name);
        let contents = std::fs::read(&file_path)
            .with_context(|| format!("cannot read file {}", file_path.display()))?;

        Ok(Bytes::from(contents))
    }

    /// Create or overwrite a file with exact bytes. Refuses to clobber a
    /// directory of the same name.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(name);
        if file_path.is_dir() {
            anyhow::bail!("cannot overwrite directory '{}'", file_path.display());
        }
        std::fs::write(&file_path, contents)
            .with_context(|| format!("cannot write file {}", file_path.display()))?;

        Ok(())
    }

    /// Stat a file; `None` when it does not exist.
    pub fn stat_file(&self, name: &str) -> anyhow::Result<Option<FileStat>> {
        let file_path = self.file_path(name);
        let metadata = match std::fs::metadata(&file_path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("cannot stat file {}", file_path.display()));
            }
        };

        let modified_at = metadata
            .modified()
            .with_context(|| format!("cannot read mtime of {}", file_path.display()))?
            .duration_since(std::time::UNIX_EPOCH)
            .map(|duration| duration.as_secs() as i64)
            .unwrap_or(0);

        Ok(Some(FileStat {
            size: metadata.len(),
            modified_at,
        }))
    }

    /// Delete one user file: a no-op when absent, an error for directories.
    pub fn restricted_delete(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(name);
        let metadata = match std::fs::metadata(&file_path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("cannot stat file {}", file_path.display()));
            }
        };
        if metadata.is_dir() {
            anyhow::bail!("cannot delete directory '{}'", file_path.display());
        }

        std::fs::remove_file(&file_path)
            .with_context(|| format!("cannot delete file {}", file_path.display()))
    }
}
