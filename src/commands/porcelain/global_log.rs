use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

impl Repository {
    /// Print every commit blob in the object store, in filename order.
    /// File blobs are skipped.
    pub async fn global_log(&self) -> anyhow::Result<()> {
        for (commit_id, commit) in self.all_commits()? {
            self.print_log_entry(&commit_id, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the object store, sorted by id.
    pub(crate) fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut commits = Vec::new();
        for name in self.database().object_ids()? {
            let object_id = ObjectId::try_parse(name)?;
            let (object_type, payload) = self
                .database()
                .load(&object_id)
                .with_context(|| format!("cannot read object {object_id}"))?;
            if object_type != ObjectType::Commit {
                continue;
            }
            commits.push((object_id, Commit::from_payload(&payload)?));
        }

        Ok(commits)
    }
}
