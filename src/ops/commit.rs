use tracing::info;

use crate::error::Result;
use crate::hash::Hash;
use crate::head::{current_head, write_head};
use crate::index;
use crate::object::write_commit;
use crate::repo::Repo;
use crate::types::Commit;

/// record the staged files as a new commit on top of HEAD
///
/// stores the commit, moves HEAD to it, then clears the index. a failure in
/// any step is returned with the path that failed; earlier steps are not
/// rolled back (an orphaned commit object is harmless).
pub fn commit(repo: &Repo, message: &str) -> Result<Hash> {
    let _lock = repo.lock()?;

    let staged = index::read_all(repo)?;
    let parent = current_head(repo);

    let commit = Commit::new(message, parent, staged);
    let hash = write_commit(repo, &commit)?;

    write_head(repo, &hash)?;
    index::clear(repo)?;

    info!(%hash, files = commit.files.len(), "created commit");
    Ok(hash)
}
