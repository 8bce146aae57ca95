use crate::areas::repository::Repository;
use crate::errors::Fatal;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current head. Does not switch to it.
    pub async fn branch(&self, name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(name) {
            return Err(Fatal::BranchAlreadyExists.into());
        }

        let head_id = self
            .refs()
            .head_commit_id()
            .context("branch: cannot read head commit hash")?;
        self.refs()
            .write_branch(name, &head_id)
            .context("branch: cannot write branch ref")?;

        writeln!(
            self.writer(),
            "Branch '{name}' was created on commit ({}).",
            head_id.short()
        )?;

        Ok(())
    }
}
