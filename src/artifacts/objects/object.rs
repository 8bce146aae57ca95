//! Core object trait and content hashing
//!
//! Every stored object is a typed blob: a one-word type header, a single
//! NUL separator, and the payload bytes. The object id is the SHA-1 digest
//! over that exact sequence, so the id of an object equals the hash of the
//! bytes sitting in the object store.
//!
//! ## Object Format
//!
//! ```text
//! <type>\0<payload>
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};

/// Separator between the type header and the payload.
pub const HEADER_DELIM: u8 = 0;

/// One piece of hash input.
///
/// Callers feed the digest mixed payloads (text headers, raw contents), so
/// the hasher takes an ordered sequence of typed fragments rather than a
/// single byte slice.
#[derive(Debug, Clone, Copy)]
pub enum HashFragment<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Digest an ordered sequence of fragments into a 40-hex object id.
pub fn hash_fragments(fragments: &[HashFragment<'_>]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    for fragment in fragments {
        match fragment {
            HashFragment::Text(text) => hasher.update(text.as_bytes()),
            HashFragment::Bytes(bytes) => hasher.update(bytes),
        }
    }

    let digest = hasher.finalize();
    ObjectId::try_parse(format!("{digest:x}"))
}

/// Trait for objects that can be written into the object store.
pub trait Packable {
    /// The type header for this object.
    fn object_type(&self) -> ObjectType;

    /// The payload bytes, without the header.
    fn payload(&self) -> Result<Bytes>;

    /// Serialize the object to its on-disk bytes (header, NUL, payload).
    fn serialize(&self) -> Result<Bytes> {
        let payload = self.payload()?;
        let mut object_bytes = Vec::with_capacity(payload.len() + 8);
        object_bytes.extend_from_slice(self.object_type().as_str().as_bytes());
        object_bytes.push(HEADER_DELIM);
        object_bytes.extend_from_slice(&payload);

        Ok(Bytes::from(object_bytes))
    }

    /// Compute the object id: the digest of (header, NUL, payload) in order.
    fn object_id(&self) -> Result<ObjectId> {
        let payload = self.payload()?;
        hash_fragments(&[
            HashFragment::Text(self.object_type().as_str()),
            HashFragment::Bytes(&[HEADER_DELIM]),
            HashFragment::Bytes(&payload),
        ])
    }
}
