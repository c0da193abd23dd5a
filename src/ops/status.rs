use crate::error::Result;
use crate::hash::Hash;
use crate::head::current_head;
use crate::index;
use crate::repo::Repo;
use crate::types::StagedEntry;

/// HEAD and the files waiting for the next commit
#[derive(Debug, Clone)]
pub struct Status {
    pub head: Option<Hash>,
    pub staged: Vec<StagedEntry>,
}

pub fn status(repo: &Repo) -> Result<Status> {
    Ok(Status {
        head: current_head(repo),
        staged: index::read_all(repo)?,
    })
}
