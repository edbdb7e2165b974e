//! `clone <src> <dst> [--bare]`.

use crate::diff::toc_diff;
use crate::error::{EnkelErrorKind, Result};
use crate::index::Index;
use crate::odb::copy_reachable;
use crate::pathtree::Toc;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::anyhow;
use std::path::Path;

pub fn run(src: &Path, dst: &Path, bare: bool) -> Result<Repository> {
    let src_repo = Repository::at(src)
        .map_err(|_| anyhow!(EnkelErrorKind::SourceNotARepository(src.display().to_string())))?;
    let mut dst_repo = Repository::init(dst, bare)?;

    let src_url = src_repo.worktree().display().to_string();
    dst_repo.config_mut().set_remote_url("origin", &src_url);
    dst_repo.write_config()?;

    for (branch, oid) in src_repo.refs().local_heads()? {
        copy_reachable(src_repo.objects(), dst_repo.objects(), oid)?;
        dst_repo.refs().write(&refs::to_remote_ref("origin", &branch), &RefValue::Hash(oid))?;
    }

    let head_branch = src_repo.refs().head_branch_name()?.unwrap_or_else(|| "master".to_owned());
    if let Some(oid) = dst_repo.refs().hash(dst_repo.objects(), &refs::to_remote_ref("origin", &head_branch))? {
        dst_repo.refs().write(&refs::to_local_ref(&head_branch), &RefValue::Hash(oid))?;
        dst_repo.refs().write(refs::HEAD, &RefValue::Symbolic(refs::to_local_ref(&head_branch)))?;

        let toc = dst_repo.objects().commit_toc(oid)?;
        dst_repo.index().write(&Index::toc_to_index(&toc))?;
        if !dst_repo.is_bare() {
            dst_repo.apply_to_working_copy(&toc_diff(&Toc::new(), &toc, None))?;
        }
    }

    log::info!("cloned `{}` into `{}`", src.display(), dst.display());
    Ok(dst_repo)
}
