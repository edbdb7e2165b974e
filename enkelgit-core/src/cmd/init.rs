//! `init [--bare]`.

use crate::error::Result;
use crate::repo::Repository;
use std::path::Path;

pub fn run(path: &Path, bare: bool) -> Result<Repository> {
    let repo = Repository::init(path, bare)?;
    log::info!(
        "initialized {}repository in `{}`",
        if bare { "bare " } else { "" },
        repo.worktree().display()
    );
    Ok(repo)
}
