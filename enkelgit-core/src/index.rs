//! the index: staging area between the working copy and the next commit, encoding
//! per-path merge stage alongside content hash.
//!
//! Entries are keyed by `(path, stage)`, with mutator methods that read-modify-write the
//! whole structure. The on-disk format is a flat text file (`path stage hash` per line)
//! rather than a binary index with tree-cache and reuc extensions — this system has no
//! need for those caches.

use crate::error::Result;
use crate::hash::ObjectId;
use crate::hash::hash_bytes;
use crate::lockfile;
use crate::odb::ObjectStore;
use crate::pathtree::Toc;
use anyhow::Context;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// the "no conflict, this is just what's recorded" stage.
pub const STAGE_NORMAL: u8 = 0;
pub const STAGE_BASE: u8 = 1;
pub const STAGE_RECEIVER: u8 = 2;
pub const STAGE_GIVER: u8 = 3;

pub type IndexKey = (PathBuf, u8);
pub type IndexMap = BTreeMap<IndexKey, ObjectId>;

pub struct Index {
    index_path: PathBuf,
    worktree: PathBuf,
}

impl Index {
    pub fn new(index_path: PathBuf, worktree: PathBuf) -> Self {
        Self { index_path, worktree }
    }

    /// reading a missing or empty index file produces an empty map.
    pub fn read(&self) -> Result<IndexMap> {
        let mut map = IndexMap::new();
        let text = match fs::read_to_string(&self.index_path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(map),
            Err(err) => return Err(err.into()),
        };
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, ' ');
            let path = parts.next().context("malformed index line: missing path")?;
            let stage = parts.next().context("malformed index line: missing stage")?;
            let hash = parts.next().context("malformed index line: missing hash")?;
            let stage: u8 = stage.parse().with_context(|| format!("malformed index stage `{}`", stage))?;
            map.insert((PathBuf::from(path), stage), ObjectId::from_str(hash)?);
        }
        Ok(map)
    }

    pub fn write(&self, map: &IndexMap) -> Result<()> {
        let mut buf = String::new();
        for ((path, stage), oid) in map {
            buf.push_str(&format!("{} {} {}\n", path.display(), stage, oid));
        }
        lockfile::write_atomic(&self.index_path, buf.as_bytes())
    }

    /// the stage-0 table of contents: what the next commit would record.
    pub fn toc(&self) -> Result<Toc> {
        Ok(self
            .read()?
            .into_iter()
            .filter(|((_, stage), _)| *stage == STAGE_NORMAL)
            .map(|((path, _), oid)| (path, oid))
            .collect())
    }

    pub fn has_file(&self, path: &Path, stage: u8) -> Result<bool> {
        Ok(self.read()?.contains_key(&(path.to_owned(), stage)))
    }

    pub fn is_file_in_conflict(&self, path: &Path) -> Result<bool> {
        let map = self.read()?;
        Ok((STAGE_BASE..=STAGE_GIVER).any(|stage| map.contains_key(&(path.to_owned(), stage))))
    }

    pub fn conflicted_paths(&self) -> Result<Vec<PathBuf>> {
        let map = self.read()?;
        let mut paths: Vec<PathBuf> =
            map.keys().filter(|(_, stage)| *stage != STAGE_NORMAL).map(|(path, _)| path.clone()).collect();
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// stage content at stage 0, removing any other stage entries for `path` first
    /// (clearing a prior conflict when it's resolved this way).
    pub fn write_non_conflict(&self, objects: &ObjectStore, path: &Path, content: &[u8]) -> Result<()> {
        let mut map = self.read()?;
        remove_all_stages(&mut map, path);
        let oid = objects.write(content)?;
        map.insert((path.to_owned(), STAGE_NORMAL), oid);
        self.write(&map)
    }

    /// stage a three-way conflict: receiver at stage 2, giver at stage 3, base (if any)
    /// at stage 1. Any prior stage-0 entry for `path` is removed.
    pub fn write_conflict(
        &self,
        objects: &ObjectStore,
        path: &Path,
        receiver: &[u8],
        giver: &[u8],
        base: Option<&[u8]>,
    ) -> Result<()> {
        let mut map = self.read()?;
        map.remove(&(path.to_owned(), STAGE_NORMAL));
        let r_oid = objects.write(receiver)?;
        let g_oid = objects.write(giver)?;
        map.insert((path.to_owned(), STAGE_RECEIVER), r_oid);
        map.insert((path.to_owned(), STAGE_GIVER), g_oid);
        if let Some(base) = base {
            map.insert((path.to_owned(), STAGE_BASE), objects.write(base)?);
        } else {
            map.remove(&(path.to_owned(), STAGE_BASE));
        }
        self.write(&map)
    }

    pub fn write_rm(&self, path: &Path) -> Result<()> {
        let mut map = self.read()?;
        remove_all_stages(&mut map, path);
        self.write(&map)
    }

    /// current on-disk hash of every path the index tracks, skipping paths no longer
    /// present on disk. Never reports untracked files.
    pub fn working_copy_toc(&self) -> Result<Toc> {
        let map = self.read()?;
        let mut out = Toc::new();
        let mut seen = HashSet::new();
        for (path, _) in map.keys() {
            if !seen.insert(path.clone()) {
                continue;
            }
            if let Ok(bytes) = fs::read(self.worktree.join(path)) {
                out.insert(path.clone(), hash_bytes(&bytes));
            }
        }
        Ok(out)
    }

    /// build the index map a TOC would produce if staged wholesale at stage 0: every
    /// previous entry for a path is superseded (whatever stage it was at).
    pub fn toc_to_index(toc: &Toc) -> IndexMap {
        toc.iter().map(|(path, oid)| ((path.clone(), STAGE_NORMAL), *oid)).collect()
    }

    /// indexed paths whose flat string starts with `prefix` (already resolved to a
    /// repo-root-relative path by the caller — this is plain prefix matching, not glob).
    pub fn matching_files(&self, prefix: &Path) -> Result<Vec<PathBuf>> {
        let prefix_str = prefix.to_string_lossy().into_owned();
        let mut out: Vec<PathBuf> = self
            .toc()?
            .into_keys()
            .filter(|path| path.to_string_lossy().starts_with(prefix_str.as_str()))
            .collect();
        out.sort();
        Ok(out)
    }
}

fn remove_all_stages(map: &mut IndexMap, path: &Path) {
    for stage in STAGE_NORMAL..=STAGE_GIVER {
        map.remove(&(path.to_owned(), stage));
    }
}
