//! Three-way merge
//!
//! After the preconditions, the split point (latest common ancestor) is
//! located; two shortcut cases end early (target is an ancestor; current
//! can fast-forward). Otherwise every file named by the split point or
//! either head goes through the resolution table, conflicts are rendered
//! with textual markers, and a two-parent merge commit records the result.

use crate::areas::repository::Repository;
use crate::artifacts::merge::resolution::{Presence, Resolution, render_conflict, resolve};
use crate::artifacts::merge::split_point::{SlimCommit, SplitPointFinder};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Fatal, is_not_found};
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    pub async fn merge(&self, target_branch: &str) -> anyhow::Result<()> {
        {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate().context("merge: cannot read index")?;
            if !index.is_empty() {
                return Err(Fatal::UncommittedChanges.into());
            }
        }

        let target_id = match self.refs().read_branch(target_branch) {
            Ok(target_id) => target_id,
            Err(err) if is_not_found(&err) => return Err(Fatal::BranchDoesNotExist.into()),
            Err(err) => return Err(err),
        };

        let current_branch = self.refs().current_branch()?;
        if target_branch == current_branch {
            return Err(Fatal::MergeWithSelf.into());
        }

        let target_commit = self
            .read_commit(&target_id)
            .context("merge: cannot read target branch head")?;
        let (current_id, current_commit) = self
            .head_commit()
            .context("merge: cannot get head commit")?;

        self.ensure_no_untracked_in_the_way(&current_commit, &target_commit)?;

        let finder = SplitPointFinder::new(|commit_id: &ObjectId| {
            let commit = self.read_commit(commit_id)?;
            slim(&commit)
        });
        let split_id = finder
            .find(&current_id, &target_id)
            .context("merge: cannot find split point")?;

        if split_id == target_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_id == current_id {
            self.checkout_branch(target_branch).await?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split_commit = self
            .read_commit(&split_id)
            .context("merge: cannot read split point commit")?;

        let conflicted = self
            .resolve_files(&split_commit, &current_commit, &target_commit, &target_id)
            .await?;

        self.record_commit(
            &format!("Merged {target_branch} into {current_branch}."),
            [current_id.to_string(), target_id.to_string()],
            true,
        )
        .await
        .context("merge: cannot record merge commit")?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Run every file through the resolution table and apply the outcome.
    /// Returns whether any conflict was rendered.
    async fn resolve_files(
        &self,
        split_commit: &Commit,
        current_commit: &Commit,
        target_commit: &Commit,
        target_id: &ObjectId,
    ) -> anyhow::Result<bool> {
        let mut all_files = BTreeSet::new();
        all_files.extend(split_commit.files().keys().cloned());
        all_files.extend(current_commit.files().keys().cloned());
        all_files.extend(target_commit.files().keys().cloned());

        let mut conflicted = false;
        for file in &all_files {
            let presence = Presence {
                split: split_commit.blob_for(file),
                current: current_commit.blob_for(file),
                target: target_commit.blob_for(file),
            };

            match resolve(presence) {
                Resolution::KeepCurrent => {}
                Resolution::TakeTarget => {
                    self.checkout_file(target_id.as_ref(), file).await?;
                    self.stage_file(file).await?;
                }
                Resolution::RemoveFromCurrent => {
                    self.rm(file).await.context("merge: cannot drop file")?;
                }
                Resolution::Conflict => {
                    let current_bytes = self.side_contents(presence.current)?;
                    let target_bytes = self.side_contents(presence.target)?;

                    // Distinct blob ids with identical bytes are settled,
                    // not conflicted.
                    if presence.current.is_some()
                        && presence.target.is_some()
                        && current_bytes == target_bytes
                    {
                        continue;
                    }

                    let rendered = render_conflict(&current_bytes, &target_bytes);
                    self.workspace()
                        .write_file(file, &rendered)
                        .with_context(|| format!("merge: cannot write conflicted '{file}'"))?;
                    self.stage_file(file).await?;
                    conflicted = true;
                }
            }
        }

        Ok(conflicted)
    }

    /// The bytes one side contributes to a conflict; a removed side
    /// contributes none.
    fn side_contents(&self, blob_id: Option<&str>) -> anyhow::Result<Vec<u8>> {
        match blob_id {
            None => Ok(Vec::new()),
            Some(blob_id) => {
                let blob_id = ObjectId::try_parse(blob_id)
                    .context("merge: invalid blob id in commit")?;
                Ok(self.read_file_blob(&blob_id)?.to_vec())
            }
        }
    }
}

fn slim(commit: &Commit) -> anyhow::Result<SlimCommit> {
    let parents = [commit.parent0(), commit.parent1()]
        .into_iter()
        .flatten()
        .map(ObjectId::try_parse)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(SlimCommit { parents })
}
