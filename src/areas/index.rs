//! Staging area (index)
//!
//! A persistent map from working-tree path to staging entry, serialized as
//! one serde_json file at `.gitlet/INDEX`. The staging engine is the only
//! writer. Every command that needs the index rehydrates it first, so each
//! command works from a fresh on-disk copy; an empty map means there is
//! nothing to commit.

use crate::artifacts::index::index_entry::IndexEntry;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    /// Replace the in-memory state with the on-disk state.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        let index_data = std::fs::read(&self.path)
            .with_context(|| format!("cannot read index file at {}", self.path.display()))?;
        self.entries = serde_json::from_slice(&index_data)
            .with_context(|| format!("cannot parse index file at {}", self.path.display()))?;

        Ok(())
    }

    /// Persist the in-memory state.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let index_data = serde_json::to_vec(&self.entries).context("cannot serialize index")?;
        std::fs::write(&self.path, index_data)
            .with_context(|| format!("cannot write index file at {}", self.path.display()))?;

        Ok(())
    }

    /// Write a fresh empty index file, as done at init and after commits.
    pub fn bootstrap(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.write_updates()
    }

    pub fn entry(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.get(name)
    }

    pub fn add(&mut self, name: String, entry: IndexEntry) {
        self.entries.insert(name, entry);
    }

    pub fn remove(&mut self, name: &str) -> Option<IndexEntry> {
        self.entries.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }
}
