use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{IoResultExt, Result};

/// replace `dest` with `content` atomically
///
/// temp file in `tmp_dir` -> fsync -> rename -> fsync parent directory.
/// `tmp_dir` must live on the same filesystem as `dest`.
pub fn write_atomic(tmp_dir: &Path, dest: &Path, content: &[u8]) -> Result<()> {
    let tmp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(content).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    if let Err(e) = fs::rename(&tmp_path, dest).with_path(dest) {
        // best effort, the rename error is the one worth reporting
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Some(parent) = dest.parent() {
        fsync_dir(parent)?;
    }

    Ok(())
}

/// fsync a directory
pub fn fsync_dir(path: &Path) -> Result<()> {
    let dir = File::open(path).with_path(path)?;
    dir.sync_all().with_path(path)?;
    Ok(())
}
