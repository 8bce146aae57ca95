use crate::areas::repository::Repository;
use crate::errors::Fatal;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message contains `query`.
    pub async fn find(&self, query: &str) -> anyhow::Result<()> {
        let mut has_match = false;
        for (commit_id, commit) in self.all_commits()? {
            if commit.message().contains(query) {
                has_match = true;
                writeln!(self.writer(), "{commit_id}")?;
            }
        }

        if !has_match {
            return Err(Fatal::NoMatchingCommit.into());
        }

        Ok(())
    }
}
