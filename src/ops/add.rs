use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{IoResultExt, Result};
use crate::index;
use crate::object::put;
use crate::repo::Repo;
use crate::types::StagedEntry;

/// store a file's content and append it to the staging index
///
/// files inside the repository root are recorded relative to it, anything
/// else under the path as given.
pub fn add(repo: &Repo, file: &Path) -> Result<StagedEntry> {
    let _lock = repo.lock()?;

    let content = fs::read(file).with_path(file)?;
    let hash = put(repo, &content)?;

    let path = staged_path(repo, file)?;
    index::append(repo, path.clone(), hash)?;
    info!(%path, %hash, "added file");

    Ok(StagedEntry::new(path, hash))
}

/// path under which `file` is recorded in the index
fn staged_path(repo: &Repo, file: &Path) -> Result<String> {
    let absolute = file.canonicalize().with_path(file)?;
    let root = repo.root().canonicalize().with_path(repo.root())?;

    match absolute.strip_prefix(&root) {
        Ok(rel) => Ok(rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")),
        Err(_) => Ok(file.to_string_lossy().into_owned()),
    }
}
