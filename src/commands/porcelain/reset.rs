use crate::areas::repository::Repository;
use anyhow::Context;

impl Repository {
    /// Hard reset: materialize an arbitrary commit into the working tree
    /// and move the current branch ref to it. HEAD keeps naming the same
    /// branch; the index is cleared.
    pub async fn reset(&self, commit_ref: &str) -> anyhow::Result<()> {
        let (target_id, target_commit) = self.commit_by_id(commit_ref)?;

        let (_, head_commit) = self
            .head_commit()
            .context("reset: cannot get head commit")?;
        self.ensure_no_untracked_in_the_way(&head_commit, &target_commit)?;

        self.materialize(&target_commit).await?;

        self.refs()
            .advance_head_branch(&target_id)
            .context("reset: cannot move current branch")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.bootstrap().context("reset: cannot clear index")?;

        Ok(())
    }
}
