use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// one staged file: the path it was added under and its blob hash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedEntry {
    pub path: String,
    pub hash: Hash,
}

impl StagedEntry {
    pub fn new(path: impl Into<String>, hash: Hash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }
}

impl std::fmt::Display for StagedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.hash.short(), self.path)
    }
}
