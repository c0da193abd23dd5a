//! content-addressed object store
//!
//! blobs and commits share `objects/<hex>`; there is no on-disk type tag, so
//! callers decide how to interpret the bytes they fetch.

pub mod commit;
pub mod store;

pub use commit::{read_commit, write_commit};
pub use store::{get, list_objects, object_exists, object_path, put, resolve_prefix};
