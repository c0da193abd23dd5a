use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::store;
use crate::repo::Repo;
use crate::types::Commit;

/// write a commit to the object store
///
/// commits are serialized as CBOR; the hash is computed over those bytes.
pub fn write_commit(repo: &Repo, commit: &Commit) -> Result<Hash> {
    let bytes = commit.encode()?;
    store::put(repo, &bytes)
}

/// read a commit from the object store
pub fn read_commit(repo: &Repo, hash: &Hash) -> Result<Commit> {
    let bytes = store::get(repo, hash)?;

    ciborium::from_reader(&bytes[..]).map_err(|e| Error::MalformedCommit {
        hash: *hash,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::compute_hash;
    use crate::types::StagedEntry;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn sample_commit(parent: Option<Hash>) -> Commit {
        Commit::with_timestamp(
            "test commit",
            Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap(),
            parent,
            vec![StagedEntry::new("a.txt", compute_hash(b"a"))],
        )
    }

    #[test]
    fn test_write_and_read_commit() {
        let (_dir, repo) = test_repo();

        let commit = sample_commit(None);
        let hash = write_commit(&repo, &commit).unwrap();

        assert!(store::object_exists(&repo, &hash));
        assert_eq!(read_commit(&repo, &hash).unwrap(), commit);
    }

    #[test]
    fn test_commit_deduplication() {
        let (_dir, repo) = test_repo();

        let commit = sample_commit(None);
        let h1 = write_commit(&repo, &commit).unwrap();
        let h2 = write_commit(&repo, &commit).unwrap();

        assert_eq!(h1, h2);
    }

    #[test]
    fn test_commit_hash_rederivable_from_stored_bytes() {
        let (_dir, repo) = test_repo();

        let hash = write_commit(&repo, &sample_commit(None)).unwrap();
        let stored = std::fs::read(store::object_path(&repo, &hash)).unwrap();

        assert_eq!(compute_hash(&stored), hash);
        assert_eq!(read_commit(&repo, &hash).unwrap().encode().unwrap(), stored);
    }

    #[test]
    fn test_commit_with_parent() {
        let (_dir, repo) = test_repo();

        let parent = compute_hash(b"parent");
        let hash = write_commit(&repo, &sample_commit(Some(parent))).unwrap();

        assert_eq!(read_commit(&repo, &hash).unwrap().parent, Some(parent));
    }

    #[test]
    fn test_read_nonexistent_commit() {
        let (_dir, repo) = test_repo();

        let result = read_commit(&repo, &compute_hash(b"nothing"));
        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
    }

    #[test]
    fn test_read_blob_as_commit() {
        let (_dir, repo) = test_repo();

        let blob = store::put(&repo, b"just some text\n").unwrap();
        let result = read_commit(&repo, &blob);

        assert!(matches!(result, Err(Error::MalformedCommit { hash, .. }) if hash == blob));
    }
}
