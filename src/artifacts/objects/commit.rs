//! Commit object
//!
//! A commit is an immutable snapshot record: message, UTC timestamp in
//! seconds, the full name-to-blob mapping of tracked files, and an ordered
//! pair of parent ids where absence is the empty string. A non-empty second
//! parent marks a merge commit. The payload is serde_json with a `BTreeMap`
//! for the file mapping, so the encoded bytes are deterministic; those
//! bytes feed the content hash and therefore fix the commit's identity.

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    message: String,
    timestamp: i64,
    files: BTreeMap<String, String>,
    parents: [String; 2],
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: i64,
        files: BTreeMap<String, String>,
        parents: [String; 2],
    ) -> Self {
        Commit {
            message,
            timestamp,
            files,
            parents,
        }
    }

    /// The root of every repository: no parents, no files, epoch timestamp.
    pub fn initial() -> Self {
        Commit {
            message: String::from("initial commit"),
            timestamp: 0,
            files: BTreeMap::new(),
            parents: [String::new(), String::new()],
        }
    }

    pub fn from_payload(payload: &[u8]) -> anyhow::Result<Self> {
        serde_json::from_slice(payload).context("deserialize commit payload")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    /// The blob id tracked for `name`, if any.
    pub fn blob_for(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn parent0(&self) -> Option<&str> {
        Some(self.parents[0].as_str()).filter(|parent| !parent.is_empty())
    }

    pub fn parent1(&self) -> Option<&str> {
        Some(self.parents[1].as_str()).filter(|parent| !parent.is_empty())
    }

    pub fn is_merge(&self) -> bool {
        self.parent1().is_some()
    }

    /// Render the log entry body for this commit.
    ///
    /// The stored timestamp is UTC seconds; the date line is formatted in
    /// the local timezone.
    pub fn render(&self, id: &ObjectId) -> anyhow::Result<String> {
        let date = Local
            .timestamp_opt(self.timestamp, 0)
            .single()
            .with_context(|| format!("commit timestamp {} out of range", self.timestamp))?
            .format("%a %b %d %H:%M:%S %Y %z");

        let mut lines = vec![format!("commit {id}")];
        if let (Some(parent0), Some(parent1)) = (self.parent0(), self.parent1()) {
            lines.push(format!("Merge: {} {}", &parent0[..6], &parent1[..6]));
        }
        lines.push(format!("Date: {date}"));
        lines.push(self.message.clone());

        Ok(lines.join("\n"))
    }
}

impl Packable for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn payload(&self) -> anyhow::Result<Bytes> {
        let payload = serde_json::to_vec(self).context("serialize commit payload")?;
        Ok(Bytes::from(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Commit {
        let mut files = BTreeMap::new();
        files.insert(
            "wug.txt".to_string(),
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string(),
        );
        Commit::new(
            "add wug file".to_string(),
            1_700_000_000,
            files,
            ["b".repeat(40), String::new()],
        )
    }

    #[test]
    fn payload_round_trips_field_for_field() {
        let commit = sample();
        let payload = commit.payload().unwrap();
        let decoded = Commit::from_payload(&payload).unwrap();
        assert_eq!(commit, decoded);
    }

    #[test]
    fn payload_bytes_are_deterministic() {
        assert_eq!(sample().payload().unwrap(), sample().payload().unwrap());
    }

    #[test]
    fn identity_is_stable_for_equal_records() {
        assert_eq!(
            sample().object_id().unwrap(),
            sample().object_id().unwrap()
        );
    }

    #[test]
    fn initial_commit_has_no_parents_and_no_files() {
        let initial = Commit::initial();
        assert_eq!(initial.parent0(), None);
        assert_eq!(initial.parent1(), None);
        assert!(initial.files().is_empty());
        assert_eq!(initial.timestamp(), 0);
        assert!(!initial.is_merge());
    }

    #[test]
    fn render_includes_merge_line_only_for_merge_commits() {
        let id = ObjectId::try_parse("c".repeat(40)).unwrap();
        let plain = sample().render(&id).unwrap();
        assert!(plain.starts_with(&format!("commit {id}")));
        assert!(!plain.contains("Merge:"));

        let merge = Commit::new(
            "Merged target into main.".to_string(),
            1_700_000_000,
            BTreeMap::new(),
            ["a".repeat(40), "b".repeat(40)],
        );
        let rendered = merge.render(&id).unwrap();
        assert!(rendered.contains(&format!("Merge: {} {}", "a".repeat(6), "b".repeat(6))));
    }
}
