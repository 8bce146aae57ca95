use crate::areas::repository::Repository;
use crate::errors::Fatal;
use anyhow::Context;

impl Repository {
    /// Unstage a file, and stage it for deletion when the head commit
    /// tracks it.
    pub async fn rm(&self, file: &str) -> anyhow::Result<()> {
        let was_staged = {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate().context("rm: cannot read index")?;

            match index.entry(file).cloned() {
                Some(entry) => {
                    if let Some(hash) = entry.hash() {
                        self.database()
                            .remove(hash)
                            .context("rm: cannot delete staged file blob")?;
                    }
                    index.remove(file);
                    index.write_updates().context("rm: cannot update index")?;
                    true
                }
                None => false,
            }
        };

        let (_, head_commit) = self.head_commit().context("rm: cannot get head commit")?;
        let is_tracked = head_commit.tracks(file);

        if !was_staged && !is_tracked {
            return Err(Fatal::NoReasonToRemove.into());
        }

        if is_tracked {
            // Drop the working-tree copy if still present, then let the
            // staging engine observe the absence and record the deletion.
            self.workspace()
                .restricted_delete(file)
                .context("rm: cannot delete working-tree file")?;
            self.stage_file(file).await.context("rm: cannot stage deletion")?;
        }

        Ok(())
    }
}
