//! staging index: the ordered list of files added since the last commit

use std::fs;

use tracing::debug;

use crate::atomic::write_atomic;
use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::repo::Repo;
use crate::types::StagedEntry;

/// read every staged entry in insertion order
///
/// a missing index file reads as empty.
pub fn read_all(repo: &Repo) -> Result<Vec<StagedEntry>> {
    let path = repo.index_path();
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::Io { path, source: e }),
    };

    let entries: Vec<StagedEntry> = ciborium::from_reader(&bytes[..])?;
    Ok(entries)
}

/// append one entry; paths are not deduplicated
pub fn append(repo: &Repo, path: impl Into<String>, hash: Hash) -> Result<()> {
    let mut entries = read_all(repo)?;
    let entry = StagedEntry::new(path, hash);
    debug!(path = %entry.path, %hash, "staging entry");
    entries.push(entry);
    write_all(repo, &entries)
}

/// reset the index to an empty list
pub fn clear(repo: &Repo) -> Result<()> {
    debug!("clearing index");
    write_all(repo, &[])
}

fn write_all(repo: &Repo, entries: &[StagedEntry]) -> Result<()> {
    let mut bytes = Vec::new();
    ciborium::into_writer(entries, &mut bytes)?;
    write_atomic(&repo.tmp_path(), &repo.index_path(), &bytes)
}
