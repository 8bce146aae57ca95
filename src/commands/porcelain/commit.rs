use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Fatal;
use anyhow::Context;

impl Repository {
    /// Fold the head commit and the index into a new commit on the current
    /// branch.
    pub async fn commit(&self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            return Err(Fatal::EmptyCommitMessage.into());
        }

        let (head_id, _) = self
            .head_commit()
            .context("commit: cannot get head commit")?;
        self.record_commit(message, [head_id.to_string(), String::new()], false)
            .await?;

        Ok(())
    }

    /// Shared tail of `commit` and `merge`: snapshot = head files overlaid
    /// with the index, then write the commit blob, advance the current
    /// branch ref, and clear the index, in that order. A crash leaves at
    /// worst an unreferenced blob or a re-committable index.
    pub(crate) async fn record_commit(
        &self,
        message: &str,
        parents: [String; 2],
        allow_empty_index: bool,
    ) -> anyhow::Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate().context("commit: cannot read index")?;
        if index.is_empty() && !allow_empty_index {
            return Err(Fatal::NothingToCommit.into());
        }

        let (_, head_commit) = self
            .head_commit()
            .context("commit: cannot get head commit")?;
        let mut files = head_commit.files().clone();
        for (name, entry) in index.entries() {
            match entry {
                IndexEntry::PendingDeletion { .. } => {
                    files.remove(name);
                }
                IndexEntry::Tracked { hash, .. } => {
                    files.insert(name.clone(), hash.to_string());
                }
            }
        }

        let commit = Commit::new(
            message.to_string(),
            chrono::Utc::now().timestamp(),
            files,
            parents,
        );
        let commit_id = self
            .database()
            .store(&commit)
            .context("commit: cannot write commit blob")?;

        self.refs()
            .advance_head_branch(&commit_id)
            .context("commit: cannot update current branch file")?;

        index.bootstrap().context("commit: cannot clear index")?;

        Ok(commit_id)
    }
}
