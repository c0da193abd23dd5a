use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::head::current_head;
use crate::index;
use crate::object::{get, list_objects, read_commit};
use crate::repo::Repo;

/// fsck report
#[derive(Debug, Default)]
pub struct FsckReport {
    /// objects checked
    pub objects_checked: usize,
    /// commits reachable from HEAD
    pub commits_walked: usize,
    /// corrupt objects (hash mismatch, undecodable commit or unreadable file)
    pub corrupt_objects: Vec<CorruptObject>,
    /// missing objects referenced by HEAD, a commit or the index
    pub missing_objects: Vec<MissingObject>,
    /// objects reachable from neither HEAD nor the index
    pub dangling_objects: Vec<Hash>,
}

impl FsckReport {
    pub fn is_ok(&self) -> bool {
        self.corrupt_objects.is_empty() && self.missing_objects.is_empty()
    }
}

#[derive(Debug)]
pub struct CorruptObject {
    pub hash: Hash,
    pub object_type: ObjectType,
    pub message: String,
}

#[derive(Debug)]
pub struct MissingObject {
    pub hash: Hash,
    pub object_type: ObjectType,
    pub referenced_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Blob => write!(f, "blob"),
            ObjectType::Commit => write!(f, "commit"),
        }
    }
}

/// verify repository integrity
///
/// walks the chain from HEAD checking every commit and blob it references,
/// then re-hashes every object on disk.
pub fn fsck(repo: &Repo) -> Result<FsckReport> {
    let mut report = FsckReport::default();
    let mut reachable = HashSet::new();

    let mut next = current_head(repo).map(|h| (h, "HEAD".to_string()));
    while let Some((hash, referenced_by)) = next.take() {
        if !reachable.insert(hash) {
            break;
        }

        match read_commit(repo, &hash) {
            Ok(commit) => {
                report.commits_walked += 1;
                let owner = format!("commit {}", hash);
                for file in &commit.files {
                    check_blob(repo, &file.hash, &owner, &mut reachable, &mut report)?;
                }
                next = commit.parent.map(|p| (p, owner));
            }
            Err(Error::ObjectNotFound(_)) => {
                report.missing_objects.push(MissingObject {
                    hash,
                    object_type: ObjectType::Commit,
                    referenced_by,
                });
            }
            Err(Error::CorruptObject(_)) => {
                report.corrupt_objects.push(CorruptObject {
                    hash,
                    object_type: ObjectType::Commit,
                    message: "hash mismatch".to_string(),
                });
            }
            Err(Error::MalformedCommit { reason, .. }) => {
                report.corrupt_objects.push(CorruptObject {
                    hash,
                    object_type: ObjectType::Commit,
                    message: reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    // staged blobs are not dangling
    for entry in index::read_all(repo)? {
        check_blob(repo, &entry.hash, "index", &mut reachable, &mut report)?;
    }

    let already_corrupt: HashSet<Hash> = report.corrupt_objects.iter().map(|c| c.hash).collect();

    for hash in list_objects(repo)? {
        report.objects_checked += 1;

        if !already_corrupt.contains(&hash) {
            // unreachable objects carry no type
            let message = match get(repo, &hash) {
                Ok(_) => None,
                Err(Error::CorruptObject(_)) => Some("hash mismatch".to_string()),
                Err(Error::Io { source, .. }) => Some(format!("unreadable: {}", source)),
                Err(e) => return Err(e),
            };
            if let Some(message) = message {
                report.corrupt_objects.push(CorruptObject {
                    hash,
                    object_type: ObjectType::Blob,
                    message,
                });
            }
        }

        if !reachable.contains(&hash) {
            report.dangling_objects.push(hash);
        }
    }

    Ok(report)
}

fn check_blob(
    repo: &Repo,
    hash: &Hash,
    referenced_by: &str,
    reachable: &mut HashSet<Hash>,
    report: &mut FsckReport,
) -> Result<()> {
    if !reachable.insert(*hash) {
        return Ok(());
    }

    match get(repo, hash) {
        Ok(_) => Ok(()),
        Err(Error::ObjectNotFound(_)) => {
            report.missing_objects.push(MissingObject {
                hash: *hash,
                object_type: ObjectType::Blob,
                referenced_by: referenced_by.to_string(),
            });
            Ok(())
        }
        Err(Error::CorruptObject(_)) => {
            report.corrupt_objects.push(CorruptObject {
                hash: *hash,
                object_type: ObjectType::Blob,
                message: "hash mismatch".to_string(),
            });
            Ok(())
        }
        Err(Error::Io { source, .. }) => {
            report.corrupt_objects.push(CorruptObject {
                hash: *hash,
                object_type: ObjectType::Blob,
                message: format!("unreadable: {}", source),
            });
            Ok(())
        }
        Err(e) => Err(e),
    }
}
