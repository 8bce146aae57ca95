//! The staging engine
//!
//! `add` reconciles three views of one path: the working tree (present?
//! size, mtime, contents), the index (staged? pending deletion?), and the
//! head commit (tracked? old blob id). The decision table:
//!
//! | working tree | index            | head      | action                                   |
//! |--------------|------------------|-----------|------------------------------------------|
//! | absent       | absent           | tracked   | stage a pending deletion                 |
//! | absent       | pending deletion | tracked   | already staged, no-op                    |
//! | absent       | staged contents  | tracked   | drop stale blob, re-stage as deletion    |
//! | absent       | staged contents  | untracked | drop stale blob, remove from index       |
//! | absent       | absent           | untracked | fatal "File does not exist."             |
//! | present      | staged, stat or hash matches | any | already staged, no-op          |
//! | present      | unstaged, hash matches head  | any | no changes, no-op              |
//! | present      | staged contents  | any       | drop stale blob, write new, update entry |
//! | present      | otherwise        | any       | write new blob, insert entry             |
//!
//! The working-tree hash is the *blob* hash (over `file\0contents`), so it
//! compares directly against object-store identifiers.

use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::FileBlob;
use crate::artifacts::objects::object::Packable;
use crate::errors::Fatal;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub async fn add(&self, file: &str) -> anyhow::Result<()> {
        self.stage_file(file).await
    }

    pub(crate) async fn stage_file(&self, file: &str) -> anyhow::Result<()> {
        let (_, head_commit) = self
            .head_commit()
            .context("stage: cannot get head commit")?;
        let tracked_hash = head_commit.blob_for(file);

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate().context("stage: cannot read index")?;
        let staged = index.entry(file).cloned();

        let staged_at = chrono::Utc::now().timestamp();

        let Some(stat) = self.workspace().stat_file(file)? else {
            // The file is gone from the working tree.
            if tracked_hash.is_some() {
                match &staged {
                    Some(IndexEntry::PendingDeletion { .. }) => {
                        writeln!(self.writer(), "File '{file}' is already staged.")?;
                        return Ok(());
                    }
                    Some(IndexEntry::Tracked { hash, .. }) => {
                        // Staged contents for a file that no longer exists:
                        // the staged blob is stale.
                        self.database()
                            .remove(hash)
                            .context("stage: cannot delete old file blob")?;
                    }
                    None => {}
                }
                index.add(file.to_string(), IndexEntry::PendingDeletion { staged_at });
                index
                    .write_updates()
                    .context("stage: could not stage file for deletion")?;
                return Ok(());
            }

            return match staged {
                Some(entry) => {
                    if let Some(hash) = entry.hash() {
                        self.database()
                            .remove(hash)
                            .context("stage: cannot delete old file blob")?;
                    }
                    index.remove(file);
                    index
                        .write_updates()
                        .context("stage: could not remove file from index")?;
                    Ok(())
                }
                None => Err(Fatal::FileDoesNotExist.into()),
            };
        };

        // Cheap first pass: an untouched file matches its staging stat.
        if let Some(entry) = &staged
            && entry.matches_stat(stat.size, stat.modified_at)
        {
            writeln!(self.writer(), "File '{file}' is already staged.")?;
            return Ok(());
        }

        let contents = self
            .workspace()
            .read_file(file)
            .with_context(|| format!("stage: cannot read file '{file}'"))?;
        let blob = FileBlob::new(contents);
        let wd_hash = blob.object_id().context("stage: cannot hash file")?;

        if let Some(entry) = &staged
            && entry.hash() == Some(&wd_hash)
        {
            writeln!(self.writer(), "File '{file}' is already staged.")?;
            return Ok(());
        }
        if staged.is_none() && tracked_hash == Some(wd_hash.as_ref()) {
            writeln!(self.writer(), "No changes detected. Skipping staging...")?;
            return Ok(());
        }

        // Superseded staged contents leave a stale blob behind.
        if let Some(entry) = &staged
            && let Some(hash) = entry.hash()
        {
            self.database()
                .remove(hash)
                .context("stage: cannot delete old file blob")?;
        }

        self.database()
            .store(&blob)
            .context("stage: could not write staged file blob")?;
        index.add(
            file.to_string(),
            IndexEntry::Tracked {
                hash: wd_hash,
                staged_at,
                size: stat.size,
            },
        );
        index
            .write_updates()
            .context("stage: could not update file index")?;

        Ok(())
    }
}
