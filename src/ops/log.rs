use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::head::current_head;
use crate::object::read_commit;
use crate::repo::Repo;
use crate::types::Commit;

/// commit with its hash for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub hash: Hash,
    pub commit: Commit,
}

/// lazy walk from HEAD back to the root commit, newest first
///
/// each step reads one commit. a link that does not resolve yields a single
/// `BrokenHistory` error and ends the walk; only `parent == None` ends it
/// normally.
pub struct History<'a> {
    repo: &'a Repo,
    next: Option<(Hash, String)>,
}

impl<'a> History<'a> {
    /// start at the current HEAD
    pub fn new(repo: &'a Repo) -> Self {
        Self::from_commit(repo, current_head(repo), "HEAD")
    }

    /// start at an arbitrary commit
    pub fn from_commit(repo: &'a Repo, start: Option<Hash>, referenced_by: &str) -> Self {
        Self {
            repo,
            next: start.map(|hash| (hash, referenced_by.to_string())),
        }
    }
}

impl Iterator for History<'_> {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let (hash, referenced_by) = self.next.take()?;

        let commit = match read_commit(self.repo, &hash) {
            Ok(commit) => commit,
            Err(Error::ObjectNotFound(missing)) => {
                return Some(Err(Error::BrokenHistory {
                    missing,
                    referenced_by,
                }))
            }
            Err(e) => return Some(Err(e)),
        };

        self.next = commit
            .parent
            .map(|parent| (parent, format!("commit {}", hash)));

        Some(Ok(LogEntry { hash, commit }))
    }
}

/// get commit history from HEAD, newest first
pub fn log(repo: &Repo, max_count: Option<usize>) -> Result<Vec<LogEntry>> {
    History::new(repo)
        .take(max_count.unwrap_or(usize::MAX))
        .collect()
}

/// format a log entry for display
impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "commit {}", self.hash)?;
        writeln!(
            f,
            "Date:   {}",
            self.commit
                .timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        )?;

        writeln!(f)?;
        for line in self.commit.message.lines() {
            writeln!(f, "    {}", line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::head::write_head;
    use crate::object::{object_path, write_commit};
    use crate::ops::{add, commit};
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn commit_file(dir: &tempfile::TempDir, repo: &Repo, content: &str, message: &str) -> Hash {
        let path = dir.path().join("file.txt");
        fs::write(&path, content).unwrap();
        add(repo, &path).unwrap();
        commit(repo, message).unwrap()
    }

    #[test]
    fn test_log_empty_repo() {
        let (_dir, repo) = test_repo();
        assert!(log(&repo, None).unwrap().is_empty());
    }

    #[test]
    fn test_log_single_commit() {
        let (dir, repo) = test_repo();
        commit_file(&dir, &repo, "content", "first commit");

        let entries = log(&repo, None).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].commit.message, "first commit");
        assert!(entries[0].commit.is_root());
    }

    #[test]
    fn test_log_newest_first_follows_parents() {
        let (dir, repo) = test_repo();

        let h1 = commit_file(&dir, &repo, "v1", "commit 1");
        let h2 = commit_file(&dir, &repo, "v2", "commit 2");
        let h3 = commit_file(&dir, &repo, "v3", "commit 3");

        let entries = log(&repo, None).unwrap();
        let hashes: Vec<_> = entries.iter().map(|e| e.hash).collect();
        assert_eq!(hashes, vec![h3, h2, h1]);

        // each entry's parent is the next entry's hash
        for pair in entries.windows(2) {
            assert_eq!(pair[0].commit.parent, Some(pair[1].hash));
        }
        assert_eq!(entries[2].commit.parent, None);
    }

    #[test]
    fn test_log_max_count() {
        let (dir, repo) = test_repo();

        for i in 0..5 {
            commit_file(&dir, &repo, &format!("v{}", i), &format!("commit {}", i));
        }

        let entries = log(&repo, Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].commit.message, "commit 4");
    }

    #[test]
    fn test_history_is_lazy() {
        let (dir, repo) = test_repo();
        let h1 = commit_file(&dir, &repo, "v1", "old");
        commit_file(&dir, &repo, "v2", "new");

        // break the older link; taking only the newest never touches it
        fs::remove_file(object_path(&repo, &h1)).unwrap();

        let newest: Vec<_> = History::new(&repo).take(1).collect::<Result<_>>().unwrap();
        assert_eq!(newest.len(), 1);
    }

    #[test]
    fn test_broken_parent_link() {
        let (dir, repo) = test_repo();
        let h1 = commit_file(&dir, &repo, "v1", "old");
        let h2 = commit_file(&dir, &repo, "v2", "new");

        fs::remove_file(object_path(&repo, &h1)).unwrap();

        let mut walk = History::new(&repo);
        assert_eq!(walk.next().unwrap().unwrap().hash, h2);
        match walk.next().unwrap() {
            Err(Error::BrokenHistory {
                missing,
                referenced_by,
            }) => {
                assert_eq!(missing, h1);
                assert_eq!(referenced_by, format!("commit {}", h2));
            }
            other => panic!("expected broken history, got {:?}", other),
        }
        assert!(walk.next().is_none());

        assert!(matches!(
            log(&repo, None),
            Err(Error::BrokenHistory { .. })
        ));
    }

    #[test]
    fn test_head_points_at_missing_commit() {
        let (_dir, repo) = test_repo();
        let dangling = crate::hash::compute_hash(b"no such commit");
        write_head(&repo, &dangling).unwrap();

        match log(&repo, None) {
            Err(Error::BrokenHistory {
                missing,
                referenced_by,
            }) => {
                assert_eq!(missing, dangling);
                assert_eq!(referenced_by, "HEAD");
            }
            other => panic!("expected broken history, got {:?}", other),
        }
    }

    #[test]
    fn test_history_from_commit() {
        let (_dir, repo) = test_repo();
        let root = write_commit(&repo, &Commit::new("root", None, vec![])).unwrap();
        let child = write_commit(&repo, &Commit::new("child", Some(root), vec![])).unwrap();

        let hashes: Vec<_> = History::from_commit(&repo, Some(child), "test")
            .map(|e| e.unwrap().hash)
            .collect();
        assert_eq!(hashes, vec![child, root]);
    }

    #[test]
    fn test_log_entry_display() {
        let (dir, repo) = test_repo();
        commit_file(&dir, &repo, "content", "test message\nsecond line");

        let entries = log(&repo, None).unwrap();
        let display = format!("{}", entries[0]);

        assert!(display.starts_with(&format!("commit {}", entries[0].hash)));
        assert!(display.contains("Date:   "));
        assert!(display.contains("    test message\n    second line"));
    }
}
