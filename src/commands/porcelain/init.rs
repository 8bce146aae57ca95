use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::Fatal;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Create the `.gitlet` layout, the initial commit, and the `main`
    /// branch, and point HEAD at it.
    pub async fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(Fatal::AlreadyInitialized.into());
        }

        let gitlet_path = self.gitlet_path();
        std::fs::create_dir_all(self.database().objects_path())
            .context("cannot create objects directory")?;
        std::fs::create_dir_all(self.refs().heads_path())
            .context("cannot create refs/heads directory")?;
        std::fs::create_dir_all(self.refs().remotes_path())
            .context("cannot create refs/remotes directory")?;

        let initial_commit_id = self
            .database()
            .store(&Commit::initial())
            .context("cannot write initial commit blob")?;

        self.refs()
            .write_branch(DEFAULT_BRANCH, &initial_commit_id)
            .context("cannot create main branch")?;
        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("cannot set HEAD file")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.bootstrap().context("cannot create index")?;

        self.refs()
            .write_remotes(&BTreeMap::new())
            .context("cannot create remote registry")?;

        writeln!(
            self.writer(),
            "Initialized new Gitlet repository in {}",
            gitlet_path.display()
        )?;

        Ok(())
    }

    /// Guard for every command except `init`.
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(Fatal::NotInitialized.into());
        }

        Ok(())
    }
}
