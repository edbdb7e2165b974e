//! pure merge algorithms: common-ancestor search, fast-forward eligibility, and the
//! three-way diff a merge operates over. Orchestration (writing refs, staging the merge,
//! touching the working copy) lives in `repo.rs`, which composes these with `odb`,
//! `index`, and `checkout`.
//!
//! Common-ancestor search picks a single reproducible base even when several equally
//! valid bases exist, rather than tolerating whichever one a traversal order happens to
//! find first.

use crate::diff::{toc_diff, Diff};
use crate::hash::ObjectId;
use crate::odb::ObjectStore;
use crate::error::Result;
use std::collections::HashSet;

/// the first shared commit found by walking from the lexicographically-smaller of `a`
/// and `b`, checking membership against the other's ancestor set. Deterministic: ties
/// between multiple valid common ancestors are broken by this fixed traversal order.
pub fn common_ancestor(store: &ObjectStore, a: ObjectId, b: ObjectId) -> Result<Option<ObjectId>> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut lo_chain = vec![lo];
    lo_chain.extend(store.ancestors(lo)?);

    let mut hi_chain = vec![hi];
    hi_chain.extend(store.ancestors(hi)?);
    let hi_set: HashSet<ObjectId> = hi_chain.into_iter().collect();

    Ok(lo_chain.into_iter().find(|oid| hi_set.contains(oid)))
}

/// `r` undefined (unborn branch), or `r` reachable from `g` by following parents.
pub fn can_fast_forward(store: &ObjectStore, r: Option<ObjectId>, g: ObjectId) -> Result<bool> {
    match r {
        None => Ok(true),
        Some(r) => Ok(store.is_ancestor(g, r)?),
    }
}

/// `r` defined and not an ancestor of `g` — a sign the remote history was rewritten.
pub fn is_a_force_fetch(store: &ObjectStore, r: Option<ObjectId>, g: ObjectId) -> Result<bool> {
    match r {
        None => Ok(false),
        Some(r) => Ok(!store.is_ancestor(g, r)?),
    }
}

/// the three-way diff a merge of `r` into `g` (or vice versa) operates over, using their
/// common ancestor as base. `None` if the two histories share no ancestor.
pub fn merge_diff(store: &ObjectStore, r: ObjectId, g: ObjectId) -> Result<Option<Diff>> {
    let Some(base) = common_ancestor(store, r, g)? else { return Ok(None) };

    let receiver_toc = store.commit_toc(r)?;
    let giver_toc = store.commit_toc(g)?;
    let base_toc = store.commit_toc(base)?;

    Ok(Some(toc_diff(&receiver_toc, &giver_toc, Some(&base_toc))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathtree::{toc_to_nested, Toc};
    use tempfile::TempDir;

    fn store() -> (TempDir, ObjectStore) {
        let dir = TempDir::new().unwrap();
        (dir, ObjectStore::new(dir.path().join("objects")))
    }

    fn commit_with(store: &ObjectStore, entries: &[(&str, &[u8])], parents: Vec<ObjectId>, msg: &str) -> ObjectId {
        let mut toc = Toc::new();
        for (path, content) in entries {
            toc.insert((*path).into(), store.write(content).unwrap());
        }
        let tree = store.write_tree(&toc_to_nested(&toc)).unwrap();
        store.write_commit(tree, msg.into(), parents).unwrap()
    }

    #[test]
    fn common_ancestor_of_linear_history_is_the_older_commit() {
        let (_dir, store) = store();
        let base = commit_with(&store, &[("a.txt", b"1")], vec![], "base");
        let ahead = commit_with(&store, &[("a.txt", b"2")], vec![base], "ahead");
        assert_eq!(common_ancestor(&store, base, ahead).unwrap(), Some(base));
    }

    #[test]
    fn common_ancestor_of_diverged_branches_is_their_fork_point() {
        let (_dir, store) = store();
        let base = commit_with(&store, &[("a.txt", b"1")], vec![], "base");
        let left = commit_with(&store, &[("a.txt", b"left")], vec![base], "left");
        let right = commit_with(&store, &[("a.txt", b"right")], vec![base], "right");
        assert_eq!(common_ancestor(&store, left, right).unwrap(), Some(base));
    }

    #[test]
    fn unrelated_histories_have_no_common_ancestor() {
        let (_dir, store) = store();
        let a = commit_with(&store, &[("a.txt", b"1")], vec![], "a");
        let b = commit_with(&store, &[("b.txt", b"2")], vec![], "b");
        assert_eq!(common_ancestor(&store, a, b).unwrap(), None);
    }

    #[test]
    fn fast_forward_eligible_when_receiver_is_ancestor_of_giver() {
        let (_dir, store) = store();
        let base = commit_with(&store, &[("a.txt", b"1")], vec![], "base");
        let ahead = commit_with(&store, &[("a.txt", b"2")], vec![base], "ahead");
        assert!(can_fast_forward(&store, Some(base), ahead).unwrap());
        assert!(can_fast_forward(&store, None, base).unwrap());
        assert!(!can_fast_forward(&store, Some(ahead), base).unwrap());
    }

    #[test]
    fn force_fetch_detected_when_receiver_not_reachable_from_giver() {
        let (_dir, store) = store();
        let base = commit_with(&store, &[("a.txt", b"1")], vec![], "base");
        let rewritten = commit_with(&store, &[("a.txt", b"rewritten")], vec![], "rewritten");
        assert!(is_a_force_fetch(&store, Some(base), rewritten).unwrap());
        assert!(!is_a_force_fetch(&store, None, rewritten).unwrap());
    }

    #[test]
    fn merge_diff_surfaces_conflict_on_divergent_edits() {
        let (_dir, store) = store();
        let base = commit_with(&store, &[("a.txt", b"base")], vec![], "base");
        let left = commit_with(&store, &[("a.txt", b"left")], vec![base], "left");
        let right = commit_with(&store, &[("a.txt", b"right")], vec![base], "right");

        let diff = merge_diff(&store, left, right).unwrap().unwrap();
        assert_eq!(diff[std::path::Path::new("a.txt")].status, crate::diff::Status::Conflict);
    }
}
