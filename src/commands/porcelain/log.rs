use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from the current head down to the
    /// initial commit, printing each entry.
    pub async fn log(&self) -> anyhow::Result<()> {
        let (mut commit_id, mut commit) = self
            .head_commit()
            .context("log: cannot get head commit")?;

        loop {
            self.print_log_entry(&commit_id, &commit)?;
            match commit.parent0() {
                None => break,
                Some(parent) => {
                    commit_id = ObjectId::try_parse(parent)
                        .with_context(|| format!("log: invalid parent id '{parent}'"))?;
                    commit = self
                        .read_commit(&commit_id)
                        .context("log: cannot read parent commit")?;
                }
            }
        }

        Ok(())
    }

    pub(crate) fn print_log_entry(
        &self,
        commit_id: &ObjectId,
        commit: &Commit,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "===\n{}\n", commit.render(commit_id)?)?;

        Ok(())
    }
}
