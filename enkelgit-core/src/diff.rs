//! path-by-path three-way classification: the core of status, merge, and checkout
//! safety checks.
//!
//! A single table-driven classifier over `(receiver, base, giver)` triples rather than a
//! visitor/callback walk, since the entire operation is pure and small enough to express
//! as one pass over the union of paths.

use crate::hash::ObjectId;
use crate::pathtree::Toc;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Add,
    Modify,
    Delete,
    Same,
    Conflict,
}

/// per-path diff evidence: any of the three hashes may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffEntry {
    pub status: Status,
    pub receiver: Option<ObjectId>,
    pub base: Option<ObjectId>,
    pub giver: Option<ObjectId>,
}

impl Default for Status {
    fn default() -> Self {
        Status::Same
    }
}

pub type Diff = BTreeMap<PathBuf, DiffEntry>;

/// classify one path given its receiver/base/giver hash.
fn classify(r: Option<ObjectId>, b: Option<ObjectId>, g: Option<ObjectId>) -> Option<Status> {
    match (r, b, g) {
        (Some(r), _, Some(g)) if r == g => Some(Status::Same),
        (Some(r), Some(b), Some(g)) if r != g && r != b && g != b => Some(Status::Conflict),
        (Some(_), _, Some(_)) => Some(Status::Modify),
        (None, None, Some(_)) => Some(Status::Add),
        (Some(_), None, None) => Some(Status::Add),
        (Some(_), Some(_), None) => Some(Status::Delete),
        (None, Some(_), Some(_)) => Some(Status::Delete),
        (None, Some(_), None) => None,
        (None, None, None) => None,
    }
}

/// a three-way diff over explicit TOCs. When `base` is omitted the receiver doubles as
/// the base, which collapses the CONFLICT row: two-way diffs never report conflicts.
pub fn toc_diff(receiver: &Toc, giver: &Toc, base: Option<&Toc>) -> Diff {
    let base = base.unwrap_or(receiver);
    let mut paths: BTreeSet<&Path> = BTreeSet::new();
    paths.extend(receiver.keys().map(PathBuf::as_path));
    paths.extend(base.keys().map(PathBuf::as_path));
    paths.extend(giver.keys().map(PathBuf::as_path));

    let mut diff = Diff::new();
    for path in paths {
        let r = receiver.get(path).copied();
        let b = base.get(path).copied();
        let g = giver.get(path).copied();
        if let Some(status) = classify(r, b, g) {
            diff.insert(path.to_owned(), DiffEntry { status, receiver: r, base: b, giver: g });
        }
    }
    diff
}

/// `path -> status` view of a diff, dropping the hash evidence.
pub fn name_status(diff: &Diff) -> BTreeMap<PathBuf, Status> {
    diff.iter().map(|(path, entry)| (path.clone(), entry.status)).collect()
}

/// paths a diff actually touches (everything but SAME).
pub fn changed_paths(diff: &Diff) -> Vec<PathBuf> {
    diff.iter().filter(|(_, e)| e.status != Status::Same).map(|(path, _)| path.clone()).collect()
}
