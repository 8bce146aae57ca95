//! Object model: typed blobs and their identities
//!
//! - `object`: the `Packable` trait and the fragment hasher
//! - `object_id`: validated 40-hex identifiers
//! - `object_type`: the `commit`/`file` header tag
//! - `blob`: file contents
//! - `commit`: snapshot records

pub(crate) mod blob;
pub(crate) mod commit;
pub(crate) mod object;
pub(crate) mod object_id;
pub(crate) mod object_type;
