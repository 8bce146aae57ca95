//! File blob object
//!
//! A file blob carries the literal byte contents of one working-tree file.
//! There is no filename or mode in the payload; commits map names to blob
//! ids. Identical contents hash to the same id, so a repository stores any
//! given file version once.

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileBlob {
    /// Raw file contents, byte-exact.
    content: Bytes,
}

impl Packable for FileBlob {
    fn object_type(&self) -> ObjectType {
        ObjectType::File
    }

    fn payload(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}
