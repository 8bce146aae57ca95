//! Object database
//!
//! A flat, content-addressed directory: every object lives at
//! `.gitlet/objects/<40-hex>`, where the filename is the SHA-1 of the exact
//! file bytes (`<type>\0<payload>`). Objects are immutable; storing the
//! same logical blob twice overwrites identical bytes. Writes go through a
//! temp file and a rename so a crash never leaves a half-written object
//! under its final name.

use crate::artifacts::objects::object::{HEADER_DELIM, Packable};
use crate::artifacts::objects::object_id::{HASH_LEN, ObjectId};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of short-hash resolution; callers map these onto the fitting
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no object matches prefix '{0}'")]
    NoSuchObject(String),
    #[error("ambiguous object id prefix '{0}'")]
    AmbiguousHash(String),
}

pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Write an object and return its id.
    pub fn store(&self, object: &impl Packable) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_content = object.serialize()?;
        self.write_object(self.object_path(&object_id), object_content)?;

        Ok(object_id)
    }

    /// Read an object back as its type tag and payload.
    ///
    /// The payload is everything after the first NUL, read to EOF.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_path = self.object_path(object_id);
        let object_content = std::fs::read(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        let delim = object_content
            .iter()
            .position(|&byte| byte == HEADER_DELIM)
            .with_context(|| format!("Object {object_id} has no header delimiter"))?;

        let header = std::str::from_utf8(&object_content[..delim])
            .with_context(|| format!("Object {object_id} has a non-UTF-8 header"))?;
        let object_type = ObjectType::try_from(header)
            .with_context(|| format!("Object {object_id} has an unknown header"))?;

        Ok((object_type, Bytes::from(object_content[delim + 1..].to_vec())))
    }

    /// Drop an object file. Absence is tolerated: a superseded staged blob
    /// may already be gone.
    pub fn remove(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        match std::fs::remove_file(self.object_path(object_id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Unable to remove object file {object_id}"))
            }
        }
    }

    /// Expand a short hash to the unique stored id it abbreviates.
    pub fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self
            .object_ids()?
            .into_iter()
            .filter(|name| name.starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(name), None) => ObjectId::try_parse(name),
            (None, _) => Err(LookupError::NoSuchObject(prefix.to_string()).into()),
            (Some(_), Some(_)) => Err(LookupError::AmbiguousHash(prefix.to_string()).into()),
        }
    }

    /// Sorted names of every stored object.
    pub fn object_ids(&self) -> anyhow::Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list object directory {}", self.path.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let name = entry.file_name().to_string_lossy().to_string();
                if name.len() == HASH_LEN {
                    names.push(name);
                }
            }
        }
        names.sort();

        Ok(names)
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.as_ref())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;

        if !object_dir.exists() {
            std::fs::create_dir_all(object_dir).with_context(|| {
                format!(
                    "Unable to create object directory {}",
                    object_dir.display()
                )
            })?;
        }

        let temp_object_path = object_dir.join(Self::temp_name(&object_path));
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(&object_content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!(
                "Unable to rename object file to {}",
                object_path.display()
            )
        })?;

        Ok(())
    }

    fn temp_name(object_path: &Path) -> String {
        let suffix = object_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        format!("tmp-obj-{}-{suffix}", std::process::id())
    }
}
