//! `push <remote> <branch> [-f]`: copy every local object the remote lacks, update
//! `refs/heads/<branch>` on the remote, then update the local remote-tracking ref.

use super::fetch::remote_url;
use crate::error::{EnkelErrorKind, Result};
use crate::merge;
use crate::odb::copy_reachable;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::bail;

pub fn run(repo: &Repository, remote_name: &str, branch: &str, force: bool) -> Result<()> {
    let url = remote_url(repo, remote_name)?;
    let remote_repo = Repository::at(&url)?;

    if !remote_repo.is_bare() && remote_repo.refs().is_checked_out(branch)? {
        bail!(EnkelErrorKind::PushToCheckedOut(branch.to_owned()));
    }

    let giver = repo.require_commit(&refs::to_local_ref(branch))?;
    copy_reachable(repo.objects(), remote_repo.objects(), giver)?;

    let receiver = remote_repo.resolve(&refs::to_local_ref(branch))?;
    if !force && !merge::can_fast_forward(remote_repo.objects(), receiver, giver)? {
        bail!(EnkelErrorKind::NonFastForwardPush);
    }

    remote_repo.refs().write(&refs::to_local_ref(branch), &RefValue::Hash(giver))?;
    repo.refs().write(&refs::to_remote_ref(remote_name, branch), &RefValue::Hash(giver))?;

    log::info!("pushed `{}` to `{}` at {:#}", branch, remote_name, giver);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn local_with_commit(dir: &TempDir, content: &[u8]) -> Repository {
        let repo = Repository::init(dir.path(), false).unwrap();
        std::fs::write(dir.path().join("a.txt"), content).unwrap();
        repo.stage_path(Path::new("a.txt")).unwrap();
        repo.commit(Some("first".into())).unwrap();
        repo
    }

    #[test]
    fn pushing_to_an_empty_remote_creates_its_branch() {
        let remote_dir = TempDir::new().unwrap();
        Repository::init(remote_dir.path(), true).unwrap();

        let local_dir = TempDir::new().unwrap();
        let mut local = local_with_commit(&local_dir, b"a");
        let head = local.head_commit().unwrap().unwrap();
        crate::cmd::remote::add(&mut local, "origin", &remote_dir.path().display().to_string()).unwrap();

        run(&local, "origin", "master", false).unwrap();

        let remote = Repository::at(remote_dir.path()).unwrap();
        assert_eq!(remote.resolve("master").unwrap(), Some(head));
        assert_eq!(local.refs().hash(local.objects(), "refs/remotes/origin/master").unwrap(), Some(head));
    }

    #[test]
    fn non_fast_forward_push_is_rejected_without_force() {
        let remote_dir = TempDir::new().unwrap();
        let remote_repo = local_with_commit(&remote_dir, b"remote-only");
        // move the remote's HEAD off `master` so the push doesn't trip the
        // checked-out-branch guard instead of the fast-forward one.
        crate::cmd::branch::run(&remote_repo, Some("other")).unwrap();
        crate::cmd::checkout::run(&remote_repo, "other").unwrap();

        let local_dir = TempDir::new().unwrap();
        let mut local = local_with_commit(&local_dir, b"local-only");
        crate::cmd::remote::add(&mut local, "origin", &remote_dir.path().display().to_string()).unwrap();

        let err = run(&local, "origin", "master", false).unwrap_err();
        assert!(matches!(err.downcast_ref::<EnkelErrorKind>(), Some(EnkelErrorKind::NonFastForwardPush)));
    }

    #[test]
    fn pushing_to_the_remotes_checked_out_branch_is_rejected() {
        let remote_dir = TempDir::new().unwrap();
        local_with_commit(&remote_dir, b"a");

        let local_dir = TempDir::new().unwrap();
        let mut local = local_with_commit(&local_dir, b"a");
        crate::cmd::remote::add(&mut local, "origin", &remote_dir.path().display().to_string()).unwrap();

        let err = run(&local, "origin", "master", false).unwrap_err();
        assert!(matches!(err.downcast_ref::<EnkelErrorKind>(), Some(EnkelErrorKind::PushToCheckedOut(_))));
    }
}
