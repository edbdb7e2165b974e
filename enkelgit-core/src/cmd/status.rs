//! `status`.

use crate::diff::{name_status, toc_diff, Status};
use crate::error::Result;
use crate::repo::Repository;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct StatusReport {
    pub branch: Option<String>,
    pub detached: bool,
    /// conflicted paths left over from an unresolved merge.
    pub conflicted: Vec<PathBuf>,
    /// index vs. HEAD: what the next commit would record.
    pub staged: BTreeMap<PathBuf, Status>,
    /// working copy vs. index: what `add` would pick up.
    pub unstaged: BTreeMap<PathBuf, Status>,
}

pub fn run(repo: &Repository) -> Result<StatusReport> {
    repo.assert_not_bare()?;

    let head_toc = match repo.head_commit()? {
        Some(head) => repo.objects().commit_toc(head)?,
        None => Default::default(),
    };
    let index_toc = repo.index().toc()?;

    let staged = name_status(&toc_diff(&head_toc, &index_toc, None));
    let unstaged = name_status(&repo.diff(None, None)?);

    Ok(StatusReport {
        branch: repo.refs().head_branch_name()?,
        detached: repo.refs().is_head_detached()?,
        conflicted: repo.index().conflicted_paths()?,
        staged,
        unstaged,
    })
}
