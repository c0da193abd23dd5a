/// classification of a diff hunk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HunkKind {
    Added,
    Removed,
    Unchanged,
}

impl std::fmt::Display for HunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HunkKind::Added => write!(f, "++"),
            HunkKind::Removed => write!(f, "--"),
            HunkKind::Unchanged => write!(f, "  "),
        }
    }
}

/// a contiguous run of lines sharing one classification
///
/// `text` keeps the line terminators of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    pub kind: HunkKind,
    pub text: String,
}

impl DiffHunk {
    pub fn new(kind: HunkKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// how a file in a commit relates to the parent commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileChange {
    /// the commit has no parent; nothing to compare against
    FirstCommit,
    /// the parent commit has no entry for this path
    NewFile,
    /// line diff against the parent's version
    Modified(Vec<DiffHunk>),
}

impl FileChange {
    /// hunks computed for this file (empty for the two signals)
    pub fn hunks(&self) -> &[DiffHunk] {
        match self {
            FileChange::Modified(hunks) => hunks,
            FileChange::FirstCommit | FileChange::NewFile => &[],
        }
    }

    /// does the diff contain any added or removed lines
    pub fn has_changes(&self) -> bool {
        self.hunks().iter().any(|h| h.kind != HunkKind::Unchanged)
    }
}
