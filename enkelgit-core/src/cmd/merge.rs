//! `merge <ref>`: decides fast-forward vs. non-fast-forward and, for the latter,
//! initiates (but does not complete) the merge — completion happens via a subsequent
//! `commit` once `MERGE_HEAD` exists.

use crate::diff::{toc_diff, Status};
use crate::error::{EnkelErrorKind, Result};
use crate::hash::ObjectId;
use crate::index::{Index, IndexMap};
use crate::merge;
use crate::refs::{self, RefValue};
use crate::repo::Repository;
use anyhow::{anyhow, bail};
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    AlreadyUpToDate,
    FastForward(ObjectId),
    Initiated { conflicts: Vec<PathBuf> },
}

pub fn run(repo: &Repository, target: &str) -> Result<MergeOutcome> {
    if repo.refs().is_head_detached()? {
        bail!(EnkelErrorKind::Unsupported("cannot merge into a detached HEAD".into()));
    }

    let receiver = repo.head_commit()?;
    let giver = repo.require_commit(target)?;

    if repo.objects().is_up_to_date(receiver, giver)? {
        return Ok(MergeOutcome::AlreadyUpToDate);
    }

    let overwrite = repo.changed_files_commit_would_overwrite(giver)?;
    if !overwrite.is_empty() {
        bail!(EnkelErrorKind::WouldOverwrite(overwrite));
    }

    if merge::can_fast_forward(repo.objects(), receiver, giver)? {
        return fast_forward(repo, receiver, giver);
    }

    let receiver = receiver
        .ok_or_else(|| anyhow!(EnkelErrorKind::Unsupported("cannot merge into an unborn branch".into())))?;
    initiate(repo, target, receiver, giver)
}

fn fast_forward(repo: &Repository, receiver: Option<ObjectId>, giver: ObjectId) -> Result<MergeOutcome> {
    let terminal = repo.refs().terminal_ref(refs::HEAD)?;
    repo.refs().write(&terminal, &RefValue::Hash(giver))?;

    let giver_toc = repo.objects().commit_toc(giver)?;
    repo.index().write(&Index::toc_to_index(&giver_toc))?;

    if !repo.is_bare() {
        let receiver_toc = match receiver {
            Some(r) => repo.objects().commit_toc(r)?,
            None => Default::default(),
        };
        repo.apply_to_working_copy(&toc_diff(&receiver_toc, &giver_toc, None))?;
    }

    log::info!("fast-forwarded to {:#}", giver);
    Ok(MergeOutcome::FastForward(giver))
}

fn initiate(repo: &Repository, target: &str, receiver: ObjectId, giver: ObjectId) -> Result<MergeOutcome> {
    let diff = merge::merge_diff(repo.objects(), receiver, giver)?
        .ok_or_else(|| anyhow!(EnkelErrorKind::Unsupported("refusing to merge unrelated histories".into())))?;

    repo.refs().write(refs::MERGE_HEAD, &RefValue::Hash(giver))?;

    let head_branch = repo.refs().head_branch_name()?.unwrap_or_default();
    let mut conflicts = Vec::new();

    repo.index().write(&IndexMap::new())?;
    for (path, entry) in &diff {
        match entry.status {
            Status::Conflict => {
                let r = repo.objects().read(entry.receiver.expect("CONFLICT carries a receiver"))?.unwrap();
                let g = repo.objects().read(entry.giver.expect("CONFLICT carries a giver"))?.unwrap();
                let b = match entry.base {
                    Some(b) => repo.objects().read(b)?,
                    None => None,
                };
                repo.index().write_conflict(repo.objects(), path, &r, &g, b.as_deref())?;
                conflicts.push(path.clone());
            }
            Status::Modify => {
                let g = repo.objects().read(entry.giver.expect("MODIFY carries a giver"))?.unwrap();
                repo.index().write_non_conflict(repo.objects(), path, &g)?;
            }
            Status::Add | Status::Same => {
                let oid = entry.receiver.or(entry.giver).expect("ADD/SAME carries receiver or giver");
                let content = repo.objects().read(oid)?.unwrap();
                repo.index().write_non_conflict(repo.objects(), path, &content)?;
            }
            Status::Delete => {}
        }
    }

    let mut msg = format!("Merge {} into {}\n", target, head_branch);
    if !conflicts.is_empty() {
        msg.push_str("\nConflicts:\n");
        for path in &conflicts {
            msg.push_str(&format!("\t{}\n", path.display()));
        }
    }
    repo.refs().write_raw(refs::MERGE_MSG, &msg)?;

    if !repo.is_bare() {
        repo.apply_to_working_copy(&diff)?;
    }

    log::info!("merge of `{}` initiated, {} conflict(s)", target, conflicts.len());
    Ok(MergeOutcome::Initiated { conflicts })
}
