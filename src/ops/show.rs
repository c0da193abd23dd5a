use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::{get, list_objects, read_commit, resolve_prefix};
use crate::ops::diff::diff;
use crate::repo::Repo;
use crate::types::{Commit, FileChange};

/// a commit with every file's content and its change against the parent
#[derive(Debug, Clone)]
pub struct ShowReport {
    pub hash: Hash,
    pub commit: Commit,
    pub files: Vec<ShownFile>,
}

/// one staged entry of a shown commit
#[derive(Debug, Clone)]
pub struct ShownFile {
    pub path: String,
    pub hash: Hash,
    /// blob content, decoded as UTF-8 (invalid sequences replaced)
    pub content: String,
    pub change: FileChange,
}

/// load a commit and diff each of its files against the parent commit
///
/// a root commit reports `FirstCommit` for every file without any parent
/// lookup. otherwise the parent's first entry with the same path is the
/// comparison base, and a path the parent lacks reports `NewFile`.
pub fn show(repo: &Repo, hash: &Hash) -> Result<ShowReport> {
    let commit = read_commit(repo, hash)?;

    let parent = match commit.parent {
        Some(parent_hash) => Some(read_commit(repo, &parent_hash).map_err(|e| match e {
            Error::ObjectNotFound(missing) => Error::BrokenHistory {
                missing,
                referenced_by: format!("commit {}", hash),
            },
            other => other,
        })?),
        None => None,
    };

    let mut files = Vec::with_capacity(commit.files.len());
    for entry in &commit.files {
        let content = read_text(repo, &entry.hash)?;

        let change = match &parent {
            None => FileChange::FirstCommit,
            Some(parent) => {
                let base = match parent.find_file(&entry.path) {
                    Some(base) => Some(read_text(repo, &base.hash)?),
                    None => None,
                };
                diff(base.as_deref(), &content)
            }
        };

        files.push(ShownFile {
            path: entry.path.clone(),
            hash: entry.hash,
            content,
            change,
        });
    }

    Ok(ShowReport {
        hash: *hash,
        commit,
        files,
    })
}

/// resolve `rev` (full hash or unique prefix) and show that commit
///
/// returns `None` when no such commit exists. a missing blob or parent is
/// still an error.
pub fn show_revision(repo: &Repo, rev: &str) -> Result<Option<ShowReport>> {
    let hash = match resolve_commit(repo, rev) {
        Ok(hash) => hash,
        Err(Error::UnknownRevision(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    match show(repo, &hash) {
        Ok(report) => Ok(Some(report)),
        Err(Error::ObjectNotFound(missing)) if missing == hash => Ok(None),
        Err(e) => Err(e),
    }
}

/// like `resolve_prefix`, but a prefix shared with blobs resolves to the one
/// commit among its matches
fn resolve_commit(repo: &Repo, rev: &str) -> Result<Hash> {
    match resolve_prefix(repo, rev) {
        Err(Error::AmbiguousPrefix { prefix, matches }) => {
            let commits: Vec<Hash> = list_objects(repo)?
                .into_iter()
                .filter(|h| h.has_prefix(rev) && read_commit(repo, h).is_ok())
                .collect();
            match commits.as_slice() {
                [hash] => Ok(*hash),
                _ => Err(Error::AmbiguousPrefix { prefix, matches }),
            }
        }
        other => other,
    }
}

fn read_text(repo: &Repo, hash: &Hash) -> Result<String> {
    let bytes = get(repo, hash)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
