//! Split-point search for three-way merges
//!
//! The split point is the latest common ancestor of two heads in the commit
//! DAG. Both starting commits are pushed onto one FIFO queue and expanded
//! breadth-first against a shared visited set; the first commit observed
//! twice is the answer. Commits have at most two parents, which keeps this
//! adequate without the stale-marking machinery a general merge-base search
//! needs. Ties fall to whichever candidate enters the queue first.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;
use std::collections::{HashSet, VecDeque};

/// The slice of a commit the traversal needs: its parents, nothing else.
#[derive(Debug, Clone, Default)]
pub struct SlimCommit {
    pub parents: Vec<ObjectId>,
}

/// Finds the split point between two commits.
///
/// The loader closure maps a commit id to its `SlimCommit`, which keeps the
/// traversal independent of where commits live (object store on disk, an
/// in-memory map in tests).
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Result<SlimCommit>,
{
    load_commit: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Result<SlimCommit>,
{
    pub fn new(load_commit: CommitLoaderFn) -> Self {
        Self { load_commit }
    }

    /// Walk ancestors of both commits until one is reached from both sides.
    ///
    /// Errors if the frontiers drain without meeting, which only happens on
    /// a corrupted store (every well-formed DAG shares the initial commit).
    pub fn find(&self, left: &ObjectId, right: &ObjectId) -> Result<ObjectId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([left.clone(), right.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if !visited.insert(commit_id.clone()) {
                return Ok(commit_id);
            }
            let commit = (self.load_commit)(&commit_id)?;
            queue.extend(commit.parents);
        }

        Err(anyhow::anyhow!(
            "no common ancestor between {left} and {right}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit graph keyed by id.
    #[derive(Debug, Default)]
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, id: &ObjectId, parents: &[&ObjectId]) {
            self.commits
                .insert(id.clone(), parents.iter().map(|&p| p.clone()).collect());
        }

        fn slim(&self, id: &ObjectId) -> Result<SlimCommit> {
            let parents = self
                .commits
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("commit {id} not in test store"))?;
            Ok(SlimCommit {
                parents: parents.clone(),
            })
        }
    }

    fn oid(name: &str) -> ObjectId {
        // Deterministic 40-hex id derived from the test name.
        let mut hex = String::new();
        for byte in name.as_bytes() {
            hex.push_str(&format!("{byte:02x}"));
        }
        while hex.len() < 40 {
            hex.push('0');
        }
        hex.truncate(40);
        ObjectId::try_parse(hex).expect("invalid test id")
    }

    #[fixture]
    fn divergent_history() -> InMemoryCommitStore {
        //     A
        //    / \
        //   B   C
        let mut store = InMemoryCommitStore::default();
        let (a, b, c) = (oid("a"), oid("b"), oid("c"));
        store.add_commit(&a, &[]);
        store.add_commit(&b, &[&a]);
        store.add_commit(&c, &[&a]);
        store
    }

    #[rstest]
    fn same_commit_is_its_own_split_point(divergent_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|id| divergent_history.slim(id));
        assert_eq!(finder.find(&oid("b"), &oid("b")).unwrap(), oid("b"));
    }

    #[rstest]
    fn divergent_branches_meet_at_the_fork(divergent_history: InMemoryCommitStore) {
        let finder = SplitPointFinder::new(|id| divergent_history.slim(id));
        assert_eq!(finder.find(&oid("b"), &oid("c")).unwrap(), oid("a"));
        assert_eq!(finder.find(&oid("c"), &oid("b")).unwrap(), oid("a"));
    }

    #[rstest]
    fn ancestor_of_the_other_head_is_the_split_point() {
        // A <- B <- C, linear
        let mut store = InMemoryCommitStore::default();
        let (a, b, c) = (oid("a"), oid("b"), oid("c"));
        store.add_commit(&a, &[]);
        store.add_commit(&b, &[&a]);
        store.add_commit(&c, &[&b]);

        let finder = SplitPointFinder::new(|id| store.slim(id));
        assert_eq!(finder.find(&c, &b).unwrap(), b);
        assert_eq!(finder.find(&b, &c).unwrap(), b);
        assert_eq!(finder.find(&a, &c).unwrap(), a);
    }

    #[rstest]
    fn merge_commits_follow_both_parents() {
        //     A
        //    / \
        //   B   C
        //    \ / \
        //     D   E
        // D merges B and C; E extends C. Split of D and E is C.
        let mut store = InMemoryCommitStore::default();
        let (a, b, c, d, e) = (oid("a"), oid("b"), oid("c"), oid("d"), oid("e"));
        store.add_commit(&a, &[]);
        store.add_commit(&b, &[&a]);
        store.add_commit(&c, &[&a]);
        store.add_commit(&d, &[&b, &c]);
        store.add_commit(&e, &[&c]);

        let finder = SplitPointFinder::new(|id| store.slim(id));
        assert_eq!(finder.find(&d, &e).unwrap(), c);
    }

    #[rstest]
    fn criss_cross_resolves_by_queue_order() {
        //     A
        //    / \
        //   B   C
        //   |\ /|
        //   | X |
        //   |/ \|
        //   D   E
        // D = merge(B, C), E = merge(C, B). Both B and C are common
        // ancestors of D and E; BFS order decides.
        let mut store = InMemoryCommitStore::default();
        let (a, b, c, d, e) = (oid("a"), oid("b"), oid("c"), oid("d"), oid("e"));
        store.add_commit(&a, &[]);
        store.add_commit(&b, &[&a]);
        store.add_commit(&c, &[&a]);
        store.add_commit(&d, &[&b, &c]);
        store.add_commit(&e, &[&c, &b]);

        let finder = SplitPointFinder::new(|id| store.slim(id));
        let split = finder.find(&d, &e).unwrap();
        assert!(split == b || split == c, "expected B or C, got {split}");
    }

    #[rstest]
    fn disjoint_roots_report_no_common_ancestor() {
        let mut store = InMemoryCommitStore::default();
        let (a, b, x, y) = (oid("a"), oid("b"), oid("x"), oid("y"));
        store.add_commit(&a, &[]);
        store.add_commit(&b, &[&a]);
        store.add_commit(&x, &[]);
        store.add_commit(&y, &[&x]);

        let finder = SplitPointFinder::new(|id| store.slim(id));
        assert!(finder.find(&b, &y).is_err());
    }
}
