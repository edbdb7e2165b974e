//! conversions between the flat table-of-contents representation (`path -> blob hash`,
//! used by the index and by diffing) and the nested tree representation objects are
//! actually serialized as (directory -> { name -> entry }).

use crate::hash::ObjectId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// a flat `path -> blob hash` snapshot: a table of contents for a tree, commit, index,
/// or working copy.
pub type Toc = BTreeMap<PathBuf, ObjectId>;

/// the nested, pre-hash shape that `ObjectStore::write_tree` consumes and
/// `ObjectStore::read_tree` produces. Matches a tree object's directory structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NestedTree(pub BTreeMap<String, NestedEntry>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedEntry {
    Blob(ObjectId),
    Tree(NestedTree),
}

impl NestedTree {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert_path(&mut self, components: &[String], oid: ObjectId) {
        match components {
            [] => unreachable!("empty path"),
            [name] => {
                self.0.insert(name.clone(), NestedEntry::Blob(oid));
            }
            [head, rest @ ..] => {
                let subtree = match self.0.entry(head.clone()).or_insert_with(|| NestedEntry::Tree(NestedTree::default())) {
                    NestedEntry::Tree(t) => t,
                    NestedEntry::Blob(_) => {
                        let t = NestedTree::default();
                        self.0.insert(head.clone(), NestedEntry::Tree(t));
                        match self.0.get_mut(head).unwrap() {
                            NestedEntry::Tree(t) => t,
                            NestedEntry::Blob(_) => unreachable!(),
                        }
                    }
                };
                subtree.insert_path(rest, oid);
            }
        }
    }
}

/// build the nested directory structure that a TOC implies.
pub fn toc_to_nested(toc: &Toc) -> NestedTree {
    let mut root = NestedTree::default();
    for (path, oid) in toc {
        let components: Vec<String> =
            path.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
        if !components.is_empty() {
            root.insert_path(&components, *oid);
        }
    }
    root
}

/// flatten a nested tree back into a TOC, prefixing every entry with `prefix`.
pub fn flatten_nested(tree: &NestedTree, prefix: &Path, out: &mut Toc) {
    for (name, entry) in &tree.0 {
        let path = prefix.join(name);
        match entry {
            NestedEntry::Blob(oid) => {
                out.insert(path, *oid);
            }
            NestedEntry::Tree(sub) => flatten_nested(sub, &path, out),
        }
    }
}

pub fn flatten(tree: &NestedTree) -> Toc {
    let mut out = Toc::new();
    flatten_nested(tree, Path::new(""), &mut out);
    out
}
