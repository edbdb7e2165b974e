//! `pull <remote> <branch>`: fetch followed by a merge of `FETCH_HEAD`.

use super::merge::MergeOutcome;
use crate::error::Result;
use crate::refs;
use crate::repo::Repository;

pub fn run(repo: &Repository, remote: &str, branch: &str) -> Result<MergeOutcome> {
    super::fetch::run(repo, remote, branch)?;
    super::merge::run(repo, refs::FETCH_HEAD)
}
