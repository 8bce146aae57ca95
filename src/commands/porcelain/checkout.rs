//! Checkout in its three forms
//!
//! - a single file from the head commit
//! - a single file from an arbitrary commit (short hashes accepted)
//! - a whole branch: materialize its head snapshot into the working tree,
//!   repoint HEAD, clear the index
//!
//! The branch form guards against clobbering untracked files *before* it
//! writes anything, then writes every target file and deletes every
//! working-tree file the target does not track.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Fatal, is_not_found};
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub async fn checkout_file_from_head(&self, file: &str) -> anyhow::Result<()> {
        let (head_id, _) = self
            .head_commit()
            .context("checkout: cannot get head commit")?;
        self.checkout_file(head_id.as_ref(), file).await
    }

    pub async fn checkout_file(&self, commit_ref: &str, file: &str) -> anyhow::Result<()> {
        let (_, commit) = self.commit_by_id(commit_ref)?;
        let blob_id = commit.blob_for(file).ok_or(Fatal::FileNotInCommit)?;
        let blob_id = ObjectId::try_parse(blob_id)
            .with_context(|| format!("checkout: invalid blob id for '{file}'"))?;

        let contents = self
            .read_file_blob(&blob_id)
            .with_context(|| format!("checkout: cannot read blob for '{file}'"))?;
        self.workspace()
            .write_file(file, &contents)
            .with_context(|| format!("checkout: cannot write '{file}'"))?;

        Ok(())
    }

    pub async fn checkout_branch(&self, target_branch: &str) -> anyhow::Result<()> {
        let current_branch = self.refs().current_branch()?;
        if target_branch == current_branch {
            return Err(Fatal::CheckoutCurrentBranch.into());
        }

        let target_id = match self.refs().read_branch(target_branch) {
            Ok(target_id) => target_id,
            Err(err) if is_not_found(&err) => return Err(Fatal::NoSuchBranch.into()),
            Err(err) => return Err(err),
        };
        let target_commit = self
            .read_commit(&target_id)
            .context("checkout: cannot read target branch head")?;

        let (_, head_commit) = self
            .head_commit()
            .context("checkout: cannot get head commit")?;
        self.ensure_no_untracked_in_the_way(&head_commit, &target_commit)?;

        self.materialize(&target_commit).await?;

        self.refs()
            .set_head(target_branch)
            .context("checkout: cannot set HEAD file")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.bootstrap().context("checkout: cannot clear index")?;

        writeln!(
            self.writer(),
            "Branch '{target_branch}' is now checked out."
        )?;

        Ok(())
    }

    /// Rewrite the working tree to exactly the target snapshot: write every
    /// tracked file, then delete the leftovers. Callers must have run the
    /// untracked-file guard first.
    pub(crate) async fn materialize(&self, target: &Commit) -> anyhow::Result<()> {
        let existing_files = self.workspace().list_files()?;

        for (name, blob_id) in target.files() {
            let blob_id = ObjectId::try_parse(blob_id.as_str())
                .with_context(|| format!("checkout: invalid blob id for '{name}'"))?;
            let contents = self
                .read_file_blob(&blob_id)
                .with_context(|| format!("checkout: cannot read blob for '{name}'"))?;
            self.workspace()
                .write_file(name, &contents)
                .with_context(|| format!("checkout: cannot write '{name}'"))?;
        }

        for name in existing_files {
            if !target.tracks(&name) {
                self.workspace()
                    .restricted_delete(&name)
                    .with_context(|| format!("checkout: cannot delete '{name}'"))?;
            }
        }

        Ok(())
    }
}
