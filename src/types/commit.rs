use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::Hash;
use crate::types::StagedEntry;

/// an immutable snapshot of the staged files, linked to its parent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// commit message (free text)
    pub message: String,
    /// wall-clock time of the commit, UTC
    pub timestamp: DateTime<Utc>,
    /// previous commit, None for the root commit
    pub parent: Option<Hash>,
    /// staged files in the order they were added
    pub files: Vec<StagedEntry>,
}

impl Commit {
    /// create a new commit stamped with the current time
    pub fn new(message: impl Into<String>, parent: Option<Hash>, files: Vec<StagedEntry>) -> Self {
        Self::with_timestamp(message, Utc::now(), parent, files)
    }

    /// create a new commit with explicit timestamp
    pub fn with_timestamp(
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        parent: Option<Hash>,
        files: Vec<StagedEntry>,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parent,
            files,
        }
    }

    /// is this the first commit of the history
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// first entry recorded under `path`
    ///
    /// a path staged several times before one commit appears several times;
    /// the earliest entry wins here.
    pub fn find_file(&self, path: &str) -> Option<&StagedEntry> {
        self.files.iter().find(|f| f.path == path)
    }

    /// canonical encoding; the commit hash is the hash of these bytes
    pub fn encode(&self) -> crate::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)?;
        Ok(bytes)
    }
}
