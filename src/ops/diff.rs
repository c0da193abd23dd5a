use similar::{ChangeTag, TextDiff};

use crate::types::{DiffHunk, FileChange, HunkKind};

/// line diff of two texts as a sequence of classified hunks
///
/// adjacent lines with the same classification are merged into one hunk;
/// within a replaced region removals come before additions.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffHunk> {
    let diff = TextDiff::from_lines(old, new);
    let mut hunks: Vec<DiffHunk> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Delete => HunkKind::Removed,
            ChangeTag::Insert => HunkKind::Added,
            ChangeTag::Equal => HunkKind::Unchanged,
        };

        match hunks.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => hunks.push(DiffHunk::new(kind, change.value())),
        }
    }

    hunks
}

/// compare a file with its previous version, if there is one
pub fn diff(old: Option<&str>, new: &str) -> FileChange {
    match old {
        Some(old) => FileChange::Modified(diff_lines(old, new)),
        None => FileChange::NewFile,
    }
}
