use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::FileBlob;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::status::status_report::{StatusReport, UnstagedChange};
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print the five status sections: branches, staged, removed, unstaged
    /// modifications, untracked.
    pub async fn status(&self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate().context("status: cannot read index")?;

        let (_, head_commit) = self
            .head_commit()
            .context("status: cannot get head commit")?;

        let mut report = StatusReport {
            current_branch: self.refs().current_branch()?,
            branches: self.refs().list_branches()?.into_iter().collect(),
            ..StatusReport::default()
        };

        for (name, entry) in index.entries() {
            match entry {
                IndexEntry::PendingDeletion { .. } => {
                    report.removed.insert(name.clone());
                }
                IndexEntry::Tracked { .. } => {
                    report.staged.insert(name.clone());
                }
            }
        }

        // Tracked in head, unstaged: deleted from or modified in the tree.
        for (name, tracked_hash) in head_commit.files() {
            if index.entry(name).is_some() {
                continue;
            }
            if let Some(change) = self.probe_unstaged_change(name, tracked_hash)? {
                report.unstaged.insert(change.annotate(name));
            }
        }

        // Staged with contents: deleted from or modified in the tree since
        // staging.
        for (name, entry) in index.entries() {
            let IndexEntry::Tracked { hash, .. } = entry else {
                continue;
            };
            if let Some(change) = self.probe_unstaged_change(name, hash.as_ref())? {
                report.unstaged.insert(change.annotate(name));
            }
        }

        for name in self.workspace().list_files()? {
            if index.entry(&name).is_none() && !head_commit.tracks(&name) {
                report.untracked.insert(name);
            }
        }

        write!(self.writer(), "{}", report.render())?;

        Ok(())
    }

    /// Compare one working-tree file against a recorded blob id.
    fn probe_unstaged_change(
        &self,
        name: &str,
        recorded_hash: &str,
    ) -> anyhow::Result<Option<UnstagedChange>> {
        if self.workspace().stat_file(name)?.is_none() {
            return Ok(Some(UnstagedChange::Deleted));
        }

        let contents = self.workspace().read_file(name)?;
        let wd_hash = FileBlob::new(contents).object_id()?;
        if wd_hash.as_ref() != recorded_hash {
            return Ok(Some(UnstagedChange::Modified));
        }

        Ok(None)
    }
}
