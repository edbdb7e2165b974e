//! `checkout <ref>`.

use crate::diff::toc_diff;
use crate::error::{EnkelErrorKind, Result};
use crate::index::Index;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::bail;

/// switch HEAD to `target` (a branch name, or any other revision for a detached
/// checkout), refusing when it would overwrite uncommitted work.
pub fn run(repo: &Repository, target: &str) -> Result<()> {
    let target_oid = repo.require_commit(target)?;

    let overwrite = repo.changed_files_commit_would_overwrite(target_oid)?;
    if !overwrite.is_empty() {
        bail!(EnkelErrorKind::WouldOverwrite(overwrite));
    }

    let head_toc = match repo.head_commit()? {
        Some(head) => repo.objects().commit_toc(head)?,
        None => Default::default(),
    };
    let target_toc = repo.objects().commit_toc(target_oid)?;

    repo.index().write(&Index::toc_to_index(&target_toc))?;
    repo.apply_to_working_copy(&toc_diff(&head_toc, &target_toc, None))?;

    let local_ref = refs::to_local_ref(target);
    if refs::is_valid_name(target) && repo.refs().exists(&local_ref) {
        repo.refs().write(refs::HEAD, &RefValue::Symbolic(local_ref))?;
    } else {
        repo.refs().write(refs::HEAD, &RefValue::Hash(target_oid))?;
    }

    log::info!("checked out `{}` at {:#}", target, target_oid);
    Ok(())
}
