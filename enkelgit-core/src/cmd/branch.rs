//! `branch [<name>]`.

use crate::error::{EnkelErrorKind, Result};
use crate::hash::ObjectId;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::bail;
use std::collections::BTreeMap;

pub enum BranchOutcome {
    /// no name given: the full set of local branches.
    Listed(BTreeMap<String, ObjectId>),
    /// a new branch was created at HEAD.
    Created { name: String, target: ObjectId },
}

pub fn run(repo: &Repository, name: Option<&str>) -> Result<BranchOutcome> {
    let Some(name) = name else { return Ok(BranchOutcome::Listed(repo.refs().local_heads()?)) };

    refs::validate_branch_name(name)?;
    if repo.refs().exists(&refs::to_local_ref(name)) {
        bail!(EnkelErrorKind::BranchExists(name.to_owned()));
    }

    let target = repo.require_commit(refs::HEAD)?;
    repo.refs().write(&refs::to_local_ref(name), &RefValue::Hash(target))?;
    log::info!("created branch `{}` at {:#}", name, target);
    Ok(BranchOutcome::Created { name: name.to_owned(), target })
}
