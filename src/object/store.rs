use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::atomic::write_atomic;
use crate::error::{Error, IoResultExt, Result};
use crate::hash::{compute_hash, Hash};
use crate::repo::Repo;

/// minimum number of hex chars accepted as an abbreviated hash
pub const MIN_PREFIX_LEN: usize = 4;

/// store `content` and return its hash
///
/// writing is skipped when an object with the same hash already exists;
/// same hash means same bytes, so concurrent writers cannot disagree.
pub fn put(repo: &Repo, content: &[u8]) -> Result<Hash> {
    let hash = compute_hash(content);
    let path = object_path(repo, &hash);

    // deduplication: if object already exists, we're done
    if path.exists() {
        debug!(%hash, "object already stored");
        return Ok(hash);
    }

    write_atomic(&repo.tmp_path(), &path, content)?;
    debug!(%hash, bytes = content.len(), "stored object");

    Ok(hash)
}

/// read the bytes of an object, verifying they still hash to `hash`
pub fn get(repo: &Repo, hash: &Hash) -> Result<Vec<u8>> {
    let path = object_path(repo, hash);
    let content = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io { path, source: e }
        }
    })?;

    if compute_hash(&content) != *hash {
        return Err(Error::CorruptObject(*hash));
    }

    Ok(content)
}

/// get the filesystem path to an object
pub fn object_path(repo: &Repo, hash: &Hash) -> PathBuf {
    repo.objects_path().join(hash.to_hex())
}

/// check if an object exists in the store
pub fn object_exists(repo: &Repo, hash: &Hash) -> bool {
    object_path(repo, hash).exists()
}

/// list every object hash in the store, sorted
///
/// files whose names are not valid hashes are ignored.
pub fn list_objects(repo: &Repo) -> Result<Vec<Hash>> {
    let dir = repo.objects_path();
    let mut hashes = Vec::new();

    for entry in fs::read_dir(&dir).with_path(&dir)? {
        let entry = entry.with_path(&dir)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Ok(hash) = Hash::from_hex(name) {
            hashes.push(hash);
        }
    }

    hashes.sort();
    Ok(hashes)
}

/// resolve a full hash or an unambiguous prefix to a stored object hash
pub fn resolve_prefix(repo: &Repo, spec: &str) -> Result<Hash> {
    if spec.len() == Hash::HEX_LEN {
        return Hash::from_hex(spec);
    }

    if spec.len() < MIN_PREFIX_LEN || !spec.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHashHex(spec.to_string()));
    }

    let matching: Vec<Hash> = list_objects(repo)?
        .into_iter()
        .filter(|h| h.has_prefix(spec))
        .collect();

    match matching.as_slice() {
        [hash] => Ok(*hash),
        [] => Err(Error::UnknownRevision(spec.to_string())),
        _ => Err(Error::AmbiguousPrefix {
            prefix: spec.to_string(),
            matches: matching.len(),
        }),
    }
}
