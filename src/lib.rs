//! twig - minimal content-addressed version control
//!
//! records snapshots of a set of files, links them into a linear history and
//! diffs any snapshot against its parent.
//!
//! # Core concepts
//!
//! - **Object**: bytes stored under `objects/<sha256 hex>`; file content (a
//!   blob) or a CBOR-encoded commit. identical content is stored once.
//! - **Index**: the ordered (path, hash) list staged since the last commit
//! - **Commit**: message, UTC timestamp, parent hash and the staged files
//! - **HEAD**: the hash of the newest commit, empty before the first one
//!
//! # Layout
//!
//! ```text
//! <root>/.twig/
//!   config.toml
//!   HEAD
//!   index
//!   objects/<hex>
//!   tmp/
//! ```
//!
//! HEAD and index updates are read-modify-write. `add` and `commit` hold an
//! exclusive lock for their duration, so a racing invocation fails with
//! [`Error::LockContention`] rather than silently losing an update.
//!
//! # Example usage
//!
//! ```no_run
//! use twig::{ops, Repo};
//! use std::path::Path;
//!
//! let repo = Repo::init(Path::new("/path/to/project")).unwrap();
//! ops::add(&repo, Path::new("/path/to/project/notes.txt")).unwrap();
//! let hash = ops::commit(&repo, "first notes").unwrap();
//!
//! for entry in ops::History::new(&repo) {
//!     println!("{}", entry.unwrap());
//! }
//!
//! let report = ops::show(&repo, &hash).unwrap();
//! assert_eq!(report.files.len(), 1);
//! ```

mod atomic;
mod config;
mod error;
mod hash;
mod head;
mod repo;

pub mod index;
pub mod object;
pub mod ops;
pub mod types;

pub use config::{Config, ShowConfig, FORMAT_VERSION};
pub use error::{Error, Result};
pub use hash::{compute_hash, Hash};
pub use head::{current_head, write_head};
pub use object::{get, put, read_commit, resolve_prefix, write_commit};
pub use repo::{Repo, RepoLock, MARKER_DIR};
pub use types::{Commit, DiffHunk, FileChange, HunkKind, StagedEntry};
