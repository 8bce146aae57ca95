//! Staging entry
//!
//! One path in the index is either staged with real contents or staged for
//! deletion. The two cases used to share a single hash field with a magic
//! sentinel value; here the variant tag carries that distinction.

use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndexEntry {
    /// Staged contents: the file blob id plus a cheap-equivalence stat pair.
    ///
    /// `staged_at` is the staging time, not the file's mtime. It only short
    /// circuits re-staging a file that has not been touched since; the hash
    /// comparison is the authoritative check.
    Tracked {
        hash: ObjectId,
        staged_at: i64,
        size: u64,
    },
    /// The path is tracked in the head commit and will be dropped by the
    /// next commit.
    PendingDeletion { staged_at: i64 },
}

impl IndexEntry {
    pub fn is_pending_deletion(&self) -> bool {
        matches!(self, IndexEntry::PendingDeletion { .. })
    }

    /// The staged blob id, absent for pending deletions.
    pub fn hash(&self) -> Option<&ObjectId> {
        match self {
            IndexEntry::Tracked { hash, .. } => Some(hash),
            IndexEntry::PendingDeletion { .. } => None,
        }
    }

    /// First-pass equivalence against a working-tree stat.
    pub fn matches_stat(&self, size: u64, modified_at: i64) -> bool {
        match self {
            IndexEntry::Tracked {
                staged_at,
                size: staged_size,
                ..
            } => *staged_size == size && *staged_at == modified_at,
            IndexEntry::PendingDeletion { .. } => false,
        }
    }
}
