//! `fetch <remote> <branch>`.
//!
//! A "remote" is just a second `Repository` rooted at the configured URL (a local
//! filesystem path): an explicit second handle rather than an ambient-CWD swap.

use crate::error::{EnkelErrorKind, Result};
use crate::hash::ObjectId;
use crate::odb::copy_reachable;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::{anyhow, Context};

pub fn run(repo: &Repository, remote_name: &str, branch: &str) -> Result<ObjectId> {
    let url = remote_url(repo, remote_name)?;
    let remote_repo = Repository::at(&url).with_context(|| format!("remote `{}`", remote_name))?;

    let giver = remote_repo
        .resolve(&refs::to_local_ref(branch))?
        .ok_or_else(|| anyhow!(EnkelErrorKind::UnknownRemoteBranch(branch.to_owned())))?;

    copy_reachable(remote_repo.objects(), repo.objects(), giver)?;
    repo.refs().append_fetch_head(giver, branch, &url)?;
    repo.refs().write(&refs::to_remote_ref(remote_name, branch), &RefValue::Hash(giver))?;

    log::info!("fetched `{}` from `{}` at {:#}", branch, remote_name, giver);
    Ok(giver)
}

pub(super) fn remote_url(repo: &Repository, remote_name: &str) -> Result<String> {
    repo.config()
        .remote_url(remote_name)
        .map(str::to_owned)
        .ok_or_else(|| anyhow!(EnkelErrorKind::UnknownRemote(remote_name.to_owned())))
}
