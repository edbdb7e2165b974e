//! content-addressed storage of blobs, trees, and commits; ancestor traversal.
//!
//! Loose files only (`objects/<hash>`, one per object): no packfile or delta backend,
//! so there's a single storage path with no dispatch layer.

use crate::error::{EnkelErrorKind, Result};
use crate::hash::{hash_bytes, ObjectId};
use crate::lockfile;
use crate::obj::{detect_kind, Commit, ObjKind, Tree, TreeEntry};
use crate::pathtree::{flatten, NestedEntry, NestedTree, Toc};
use anyhow::{anyhow, Context};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[derive(Clone)]
pub struct ObjectStore {
    objects_path: PathBuf,
}

impl ObjectStore {
    pub fn new(objects_path: PathBuf) -> Self {
        Self { objects_path }
    }

    fn obj_path(&self, oid: ObjectId) -> PathBuf {
        self.objects_path.join(oid.to_hex())
    }

    /// write raw bytes, returning their hash. Writing the same bytes twice is a no-op
    /// the second time (objects are immutable, so there's nothing to reconcile).
    pub fn write(&self, bytes: &[u8]) -> Result<ObjectId> {
        let oid = hash_bytes(bytes);
        let path = self.obj_path(oid);
        if !path.exists() {
            lockfile::write_atomic(&path, bytes)?;
        }
        Ok(oid)
    }

    /// `None` for an unknown hash — absence is not an error.
    pub fn read(&self, oid: ObjectId) -> Result<Option<Vec<u8>>> {
        match fs::read(self.obj_path(oid)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn read_required(&self, oid: ObjectId) -> Result<Vec<u8>> {
        self.read(oid)?.ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(oid.to_hex())))
    }

    pub fn exists(&self, oid: ObjectId) -> bool {
        self.obj_path(oid).exists()
    }

    /// every object currently in the store, in no particular order.
    pub fn all(&self) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        if !self.objects_path.exists() {
            return Ok(out);
        }
        for entry in fs::read_dir(&self.objects_path)
            .with_context(|| format!("failed to read `{}`", self.objects_path.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                out.push(fs::read(entry.path())?);
            }
        }
        Ok(out)
    }

    pub fn kind(&self, bytes: &[u8]) -> ObjKind {
        detect_kind(bytes)
    }

    /// `[]` if `bytes` isn't a commit object.
    pub fn parents(&self, bytes: &[u8]) -> Vec<ObjectId> {
        Commit::deserialize(bytes).map(|c| c.parents).unwrap_or_default()
    }

    /// `None` if `bytes` isn't a commit object.
    pub fn tree_of(&self, bytes: &[u8]) -> Option<ObjectId> {
        Commit::deserialize(bytes).ok().map(|c| c.tree)
    }

    /// recursive closure over `parents`. Duplicates are preserved in the walk
    /// (diamond-shaped histories visit a shared ancestor once per path); callers that
    /// care about set membership should use `is_ancestor` instead.
    pub fn ancestors(&self, oid: ObjectId) -> Result<Vec<ObjectId>> {
        let mut out = Vec::new();
        self.collect_ancestors(oid, &mut out)?;
        Ok(out)
    }

    fn collect_ancestors(&self, oid: ObjectId, out: &mut Vec<ObjectId>) -> Result<()> {
        let bytes = self.read_required(oid)?;
        for parent in self.parents(&bytes) {
            out.push(parent);
            self.collect_ancestors(parent, out)?;
        }
        Ok(())
    }

    /// `true` iff `candidate` is reachable from `descendant` by following parents.
    /// Traverses with a visited set rather than `ancestors`, since diamond histories
    /// would otherwise make membership checks exponential.
    pub fn is_ancestor(&self, descendant: ObjectId, candidate: ObjectId) -> Result<bool> {
        let mut seen = HashSet::new();
        let mut frontier = vec![descendant];
        while let Some(oid) = frontier.pop() {
            if !seen.insert(oid) {
                continue;
            }
            let Some(bytes) = self.read(oid)? else { continue };
            for parent in self.parents(&bytes) {
                if parent == candidate {
                    return Ok(true);
                }
                frontier.push(parent);
            }
        }
        Ok(false)
    }

    /// true iff `receiver` is defined and the giver adds nothing it doesn't already have.
    pub fn is_up_to_date(&self, receiver: Option<ObjectId>, giver: ObjectId) -> Result<bool> {
        match receiver {
            None => Ok(false),
            Some(r) => Ok(r == giver || self.is_ancestor(r, giver)?),
        }
    }

    pub fn write_tree(&self, nested: &NestedTree) -> Result<ObjectId> {
        let mut entries = Vec::with_capacity(nested.0.len());
        for (name, entry) in &nested.0 {
            let (kind, oid) = match entry {
                NestedEntry::Blob(oid) => (crate::obj::EntryKind::Blob, *oid),
                NestedEntry::Tree(sub) => (crate::obj::EntryKind::Tree, self.write_tree(sub)?),
            };
            entries.push(TreeEntry { kind, oid, name: name.clone() });
        }
        let tree = Tree::new(entries);
        self.write(&tree.serialize())
    }

    pub fn read_tree(&self, oid: ObjectId) -> Result<NestedTree> {
        let bytes = self.read_required(oid)?;
        let tree = Tree::deserialize(&bytes)?;
        let mut out = NestedTree::default();
        for entry in tree.entries {
            let node = match entry.kind {
                crate::obj::EntryKind::Blob => NestedEntry::Blob(entry.oid),
                crate::obj::EntryKind::Tree => NestedEntry::Tree(self.read_tree(entry.oid)?),
            };
            out.0.insert(entry.name, node);
        }
        Ok(out)
    }

    pub fn write_commit(&self, tree: ObjectId, message: String, parents: Vec<ObjectId>) -> Result<ObjectId> {
        let timestamp = crate::time::now_human();
        let commit = Commit::new(tree, parents, message, timestamp);
        self.write(&commit.serialize())
    }

    pub fn read_commit(&self, oid: ObjectId) -> Result<Commit> {
        Commit::deserialize(&self.read_required(oid)?)
    }

    /// the flattened table of contents of a commit's tree.
    pub fn commit_toc(&self, commit_oid: ObjectId) -> Result<Toc> {
        let commit = self.read_commit(commit_oid)?;
        Ok(flatten(&self.read_tree(commit.tree)?))
    }
}

/// copy every object reachable from `tip` in `src` that `dst` doesn't already have.
/// Used by fetch/push/clone to move history between two repositories; safe to copy
/// unconditionally once absence is established, since objects are immutable and
/// content-addressed.
pub fn copy_reachable(src: &ObjectStore, dst: &ObjectStore, tip: ObjectId) -> Result<()> {
    let mut frontier = vec![tip];
    let mut seen = HashSet::new();
    while let Some(oid) = frontier.pop() {
        if !seen.insert(oid) || dst.exists(oid) {
            continue;
        }
        let bytes = src.read(oid)?.ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(oid.to_hex())))?;
        dst.write(&bytes)?;

        match detect_kind(&bytes) {
            ObjKind::Commit => {
                let commit = Commit::deserialize(&bytes)?;
                frontier.push(commit.tree);
                frontier.extend(commit.parents);
            }
            ObjKind::Tree => {
                let tree = Tree::deserialize(&bytes)?;
                frontier.extend(tree.entries.into_iter().map(|entry| entry.oid));
            }
            ObjKind::Blob => {}
        }
    }
    Ok(())
}
