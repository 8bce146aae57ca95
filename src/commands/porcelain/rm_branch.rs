use crate::areas::repository::Repository;
use crate::errors::Fatal;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Delete a branch ref. The branch's commits stay in the object store.
    pub async fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let current_branch = self
            .refs()
            .current_branch()
            .context("rm-branch: cannot read HEAD")?;
        if current_branch == name {
            return Err(Fatal::RemoveCurrentBranch.into());
        }
        if !self.refs().branch_exists(name) {
            return Err(Fatal::BranchDoesNotExist.into());
        }

        self.refs()
            .delete_branch(name)
            .context("rm-branch: cannot delete branch ref")?;

        writeln!(self.writer(), "Branch '{name}' has been deleted.")?;

        Ok(())
    }
}
