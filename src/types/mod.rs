mod commit;
mod diff;
mod staged;

pub use commit::Commit;
pub use diff::{DiffHunk, FileChange, HunkKind};
pub use staged::StagedEntry;
