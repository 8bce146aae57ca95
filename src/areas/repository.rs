//! Repository abstraction and coordination
//!
//! The `Repository` type coordinates the four areas (database, index,
//! workspace, refs) and carries the shared lookups the porcelain commands
//! build on: head-commit access, typed blob reads, short-hash resolution,
//! and the untracked-file guard that protects checkout, reset, and merge.
//!
//! The repository root is an explicit handle threaded into every area;
//! nothing consults the process working directory after construction.

use crate::areas::database::{Database, LookupError};
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::{HASH_LEN, ObjectId};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Fatal, is_not_found};
use bytes::Bytes;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Gitlet directory name
pub const GITLET_DIR: &str = ".gitlet";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "INDEX";

pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Index (staging area); rehydrated from disk per command
    index: Arc<Mutex<Index>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let gitlet_path = path.join(GITLET_DIR);
        let index = Index::new(gitlet_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(gitlet_path.join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(gitlet_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit the current branch points at.
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_id = self.refs.head_commit_id()?;
        let commit = self.read_commit(&head_id)?;

        Ok((head_id, commit))
    }

    /// Load a commit, verifying the blob's type tag.
    pub fn read_commit(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, payload) = self.database.load(commit_id)?;
        if object_type != ObjectType::Commit {
            anyhow::bail!(
                "incorrect blob header, want 'commit', got '{object_type}' for {commit_id}"
            );
        }

        Commit::from_payload(&payload)
    }

    /// Load a file blob's contents, verifying the blob's type tag.
    pub fn read_file_blob(&self, blob_id: &ObjectId) -> anyhow::Result<Bytes> {
        let (object_type, payload) = self.database.load(blob_id)?;
        if object_type != ObjectType::File {
            anyhow::bail!("incorrect blob header, want 'file', got '{object_type}' for {blob_id}");
        }

        Ok(payload)
    }

    /// Resolve a user-supplied commit reference, accepting short hashes.
    ///
    /// Anything that fails to name a stored commit (bad syntax, unknown
    /// prefix, missing object) becomes the "No commit with that id
    /// exists." fatal; an ambiguous prefix stays its own error.
    pub fn commit_by_id(&self, reference: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let commit_id = if reference.len() < HASH_LEN {
            match self.database.resolve_prefix(reference) {
                Ok(commit_id) => commit_id,
                Err(err) => {
                    return match err.downcast_ref::<LookupError>() {
                        Some(LookupError::NoSuchObject(_)) => Err(Fatal::NoSuchCommit.into()),
                        _ => Err(err),
                    };
                }
            }
        } else {
            match ObjectId::try_parse(reference) {
                Ok(commit_id) => commit_id,
                Err(_) => return Err(Fatal::NoSuchCommit.into()),
            }
        };

        match self.read_commit(&commit_id) {
            Ok(commit) => Ok((commit_id, commit)),
            Err(err) if is_not_found(&err) => Err(Fatal::NoSuchCommit.into()),
            Err(err) => Err(err),
        }
    }

    /// The shared precondition of checkout-branch, reset, and merge: no
    /// working-tree file that is untracked in the current head may be
    /// overwritten by materializing the target snapshot. Runs before any
    /// write.
    pub fn ensure_no_untracked_in_the_way(
        &self,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        for file in self.workspace.list_files()? {
            if !current.tracks(&file) && target.tracks(&file) {
                return Err(Fatal::UntrackedFileInTheWay.into());
            }
        }

        Ok(())
    }
}
