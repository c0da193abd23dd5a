use std::path::PathBuf;

use crate::Hash;

/// error type for twig operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not a twig repository (or any parent): {0}")]
    NoRepo(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(Hash),

    #[error("corrupt object: hash mismatch for {0}")]
    CorruptObject(Hash),

    #[error("corrupt object {hash}: not a commit record: {reason}")]
    MalformedCommit { hash: Hash, reason: String },

    #[error("broken history: {missing} referenced by {referenced_by} does not resolve")]
    BrokenHistory { missing: Hash, referenced_by: String },

    #[error("no object matches {0}")]
    UnknownRevision(String),

    #[error("ambiguous hash prefix {prefix}: matches {matches} objects")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("lock contention on repository")]
    LockContention,

    #[error("unsupported repository format version {0}")]
    UnsupportedFormat(u32),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cbor serialization error: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("cbor deserialization error: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid hash hex: {0}")]
    InvalidHashHex(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
