use crate::areas::repository::Repository;
use crate::errors::Fatal;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Register a remote Gitlet directory under a name. Registration only:
    /// nothing is fetched or pushed.
    pub async fn add_remote(&self, name: &str, location: &str) -> anyhow::Result<()> {
        let mut remotes = self
            .refs()
            .read_remotes()
            .context("add-remote: cannot read remote registry")?;
        if remotes.contains_key(name) {
            return Err(Fatal::RemoteAlreadyExists.into());
        }

        std::fs::create_dir_all(self.refs().remotes_path().join(name))
            .context("add-remote: cannot create remote refs directory")?;

        remotes.insert(name.to_string(), location.to_string());
        self.refs()
            .write_remotes(&remotes)
            .context("add-remote: cannot update remote registry")?;

        writeln!(self.writer(), "Remote '{name}' registered at {location}.")?;

        Ok(())
    }
}
