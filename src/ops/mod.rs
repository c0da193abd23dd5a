//! high-level operations on twig repositories

mod add;
mod commit;
mod diff;
mod fsck;
mod log;
mod show;
mod status;

pub use add::add;
pub use commit::commit;
pub use diff::{diff, diff_lines};
pub use fsck::{fsck, CorruptObject, FsckReport, MissingObject, ObjectType};
pub use log::{log, History, LogEntry};
pub use show::{show, show_revision, ShowReport, ShownFile};
pub use status::{status, Status};
