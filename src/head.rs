use std::fs;

use tracing::{debug, warn};

use crate::atomic::write_atomic;
use crate::error::Result;
use crate::hash::Hash;
use crate::repo::Repo;

/// read the HEAD pointer
///
/// an empty, missing or unreadable HEAD means "no history yet" and is not an
/// error.
pub fn current_head(repo: &Repo) -> Option<Hash> {
    let path = repo.head_path();

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "HEAD unreadable, treating as empty");
            return None;
        }
    };

    let hex = content.trim();
    if hex.is_empty() {
        return None;
    }

    match Hash::from_hex(hex) {
        Ok(hash) => Some(hash),
        Err(_) => {
            warn!(path = %path.display(), "HEAD does not contain a hash, treating as empty");
            None
        }
    }
}

/// point HEAD at `hash`, replacing the previous value
pub fn write_head(repo: &Repo, hash: &Hash) -> Result<()> {
    write_atomic(&repo.tmp_path(), &repo.head_path(), hash.to_hex().as_bytes())?;
    debug!(%hash, "HEAD updated");
    Ok(())
}
