//! the repository façade: discovery, layout, and the primitive operations porcelain
//! commands compose.
//!
//! An explicit value (`Repository::at(path)`/`discover(path)`) rather than an
//! arena-allocated, thread-local-bound context: no ambient-singleton or CWD-mutation,
//! and no interning layer to go with it.

use crate::config::Config;
use crate::diff::{changed_paths, name_status, toc_diff, Diff, Status};
use crate::error::{EnkelErrorKind, Result};
use crate::hash::ObjectId;
use crate::index::Index;
use crate::obj::ObjKind;
use crate::odb::ObjectStore;
use crate::pathtree::toc_to_nested;
use crate::refs::{self, RefStore, RefValue};
use anyhow::{anyhow, bail, Context};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const METADATA_DIR_NAME: &str = ".enkelgit";

pub struct Repository {
    /// the directory the user thinks of as "the repository": where commands resolve
    /// relative paths against. For a bare repository this equals `metadata_dir`.
    worktree: PathBuf,
    /// where `HEAD`, `config`, `index`, `objects/`, `refs/` actually live.
    metadata_dir: PathBuf,
    bare: bool,
    config: Config,
    objects: ObjectStore,
    refs: RefStore,
    index: Index,
}

impl Repository {
    fn assemble(worktree: PathBuf, metadata_dir: PathBuf) -> Result<Self> {
        let config = Config::read(&metadata_dir.join("config"))?;
        let bare = config.is_bare();
        let objects = ObjectStore::new(metadata_dir.join("objects"));
        let refs = RefStore::new(metadata_dir.clone());
        let index = Index::new(metadata_dir.join("index"), worktree.clone());
        Ok(Self { worktree, metadata_dir, bare, config, objects, refs, index })
    }

    /// open a repository known to live exactly at `path`, without walking parents.
    /// Used for "the other side" of fetch/push/clone, which never live in the caller's
    /// own working directory.
    pub fn at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("`{}` does not exist", path.as_ref().display()))?;

        let dotdir = path.join(METADATA_DIR_NAME);
        if dotdir.is_dir() {
            return Self::assemble(path, dotdir);
        }
        if path.join("objects").is_dir() && path.join("HEAD").is_file() {
            return Self::assemble(path.clone(), path);
        }
        Err(anyhow!(EnkelErrorKind::SourceNotARepository(path.display().to_string())))
    }

    /// walk upward from `start` looking for repository metadata, the way every other
    /// command (besides `clone`'s source/destination and the remote side of
    /// fetch/push) locates "the current repository".
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let mut dir = start
            .as_ref()
            .canonicalize()
            .with_context(|| format!("`{}` does not exist", start.as_ref().display()))?;
        loop {
            if dir.join(METADATA_DIR_NAME).is_dir() {
                return Self::assemble(dir.clone(), dir.join(METADATA_DIR_NAME));
            }
            if dir.join("objects").is_dir() && dir.join("HEAD").is_file() {
                return Self::assemble(dir.clone(), dir.clone());
            }
            match dir.parent() {
                Some(parent) => dir = parent.to_owned(),
                None => return Err(anyhow!(EnkelErrorKind::NotARepository)),
            }
        }
    }

    /// create a new repository rooted at `path` (created if missing).
    pub fn init(path: impl AsRef<Path>, bare: bool) -> Result<Self> {
        let worktree = path.as_ref();
        std::fs::create_dir_all(worktree)
            .with_context(|| format!("failed to create `{}`", worktree.display()))?;
        let worktree = worktree.canonicalize()?;
        let metadata_dir = if bare { worktree.clone() } else { worktree.join(METADATA_DIR_NAME) };

        if metadata_dir.join("HEAD").exists() {
            return Self::assemble(worktree, metadata_dir);
        }

        std::fs::create_dir_all(metadata_dir.join("objects"))?;
        std::fs::create_dir_all(metadata_dir.join("refs/heads"))?;
        std::fs::create_dir_all(metadata_dir.join("refs/remotes"))?;

        let refs = RefStore::new(metadata_dir.clone());
        refs.write(refs::HEAD, &RefValue::Symbolic(refs::to_local_ref("master")))?;

        let mut config = Config::default();
        config.set_bare(bare);
        config.write(&metadata_dir.join("config"))?;

        Self::assemble(worktree, metadata_dir)
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }

    pub fn is_bare(&self) -> bool {
        self.bare
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn write_config(&self) -> Result<()> {
        self.config.write(&self.metadata_dir.join("config"))
    }

    pub fn assert_not_bare(&self) -> Result<()> {
        if self.bare {
            bail!(EnkelErrorKind::BareRepository);
        }
        Ok(())
    }

    pub fn assert_bare(&self) -> Result<()> {
        if !self.bare {
            bail!(EnkelErrorKind::NotBareRepository);
        }
        Ok(())
    }

    /// resolve `x` per the ref-resolution algorithm; `None` if nothing names an object.
    pub fn resolve(&self, x: &str) -> Result<Option<ObjectId>> {
        self.refs.hash(&self.objects, x)
    }

    pub fn require(&self, x: &str) -> Result<ObjectId> {
        self.resolve(x)?.ok_or_else(|| anyhow!(EnkelErrorKind::UnknownRef(x.to_owned())))
    }

    /// `x`, required to resolve to a commit object.
    pub fn require_commit(&self, x: &str) -> Result<ObjectId> {
        let oid = self.require(x)?;
        let bytes =
            self.objects.read(oid)?.ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(oid.to_hex())))?;
        if self.objects.kind(&bytes) != ObjKind::Commit {
            bail!(EnkelErrorKind::RefNotACommit(x.to_owned()));
        }
        Ok(oid)
    }

    pub fn head_commit(&self) -> Result<Option<ObjectId>> {
        self.resolve(refs::HEAD)
    }

    /// `diff(h1?, h2?)`: version A is the commit-TOC of `h1` if given, else the index's
    /// TOC; version B is the commit-TOC of `h2` if given, else the working copy's TOC.
    pub fn diff(&self, h1: Option<&str>, h2: Option<&str>) -> Result<Diff> {
        let version_a = match h1 {
            Some(rev) => self.objects.commit_toc(self.require_commit(rev)?)?,
            None => self.index.toc()?,
        };
        let version_b = match h2 {
            Some(rev) => self.objects.commit_toc(self.require_commit(rev)?)?,
            None => {
                self.assert_not_bare()?;
                self.index.working_copy_toc()?
            }
        };
        Ok(toc_diff(&version_a, &version_b, None))
    }

    /// three-way diff of `receiver`/`giver` against their common ancestor.
    pub fn toc_diff_of(&self, receiver: ObjectId, giver: ObjectId, base: Option<ObjectId>) -> Result<Diff> {
        let receiver_toc = self.objects.commit_toc(receiver)?;
        let giver_toc = self.objects.commit_toc(giver)?;
        let base_toc = base.map(|oid| self.objects.commit_toc(oid)).transpose()?;
        Ok(toc_diff(&receiver_toc, &giver_toc, base_toc.as_ref()))
    }

    /// intersection of (paths changed between HEAD and the working copy) and (paths
    /// changed between HEAD and `giver`) — the safety guard for checkout/merge.
    pub fn changed_files_commit_would_overwrite(&self, giver: ObjectId) -> Result<Vec<PathBuf>> {
        let Some(head) = self.head_commit()? else { return Ok(vec![]) };
        let head_hex = head.to_hex();

        let wc_changed: HashSet<PathBuf> = changed_paths(&self.diff(Some(&head_hex), None)?).into_iter().collect();
        let giver_changed: HashSet<PathBuf> =
            changed_paths(&self.diff(Some(&head_hex), Some(&giver.to_hex()))?).into_iter().collect();

        let mut out: Vec<PathBuf> = wc_changed.intersection(&giver_changed).cloned().collect();
        out.sort();
        Ok(out)
    }

    /// paths that differ between the index and the working copy, restricted to
    /// ADD/MODIFY — what an "add everything" would pick up.
    pub fn added_or_modified_files(&self) -> Result<Vec<PathBuf>> {
        self.assert_not_bare()?;
        let statuses = name_status(&self.diff(None, None)?);
        let mut out: Vec<PathBuf> =
            statuses.into_iter().filter(|(_, s)| matches!(s, Status::Add | Status::Modify)).map(|(p, _)| p).collect();
        out.sort();
        Ok(out)
    }

    /// stage content read from the working copy at `path`, writing it into the object
    /// store and recording it at index stage 0.
    pub fn stage_path(&self, path: &Path) -> Result<()> {
        let full = self.worktree.join(path);
        let content = std::fs::read(&full).with_context(|| format!("cannot read `{}`", full.display()))?;
        self.index.write_non_conflict(&self.objects, path, &content)
    }

    /// record a commit from the index's current stage-0 contents. When a merge is in
    /// progress (`MERGE_HEAD` exists) the prewritten `MERGE_MSG` is used instead of
    /// `message`, two parents are recorded, and the merge markers are cleared on success.
    pub fn commit(&self, message: Option<String>) -> Result<ObjectId> {
        if !self.index.conflicted_paths()?.is_empty() {
            bail!(EnkelErrorKind::UnresolvedConflicts);
        }

        let merging = self.refs.exists(refs::MERGE_HEAD);
        let tree = self.objects.write_tree(&toc_to_nested(&self.index.toc()?))?;
        let parents = self.refs.commit_parent_hashes(&self.objects)?;

        if !merging {
            if let Some(&head) = parents.first() {
                if self.objects.read_commit(head)?.tree == tree {
                    bail!(EnkelErrorKind::NothingToCommit);
                }
            }
        }

        let message = if merging {
            self.refs.merge_msg()?.context("merge in progress but MERGE_MSG is missing")?
        } else {
            message.context("commit message required")?
        };

        let commit_oid = self.objects.write_commit(tree, message, parents)?;
        let terminal = self.refs.terminal_ref(refs::HEAD)?;
        self.refs.write(&terminal, &RefValue::Hash(commit_oid))?;

        if merging {
            self.refs.remove(refs::MERGE_HEAD)?;
            self.refs.remove(refs::MERGE_MSG)?;
        }

        Ok(commit_oid)
    }

    /// apply a diff to the working copy (no-op, successfully, when bare).
    pub fn apply_to_working_copy(&self, diff: &Diff) -> Result<()> {
        if self.bare {
            return Ok(());
        }
        crate::checkout::apply_diff(&self.objects, &self.worktree, &self.metadata_dir, diff)
    }
}

#[cfg(test)]
mod tests;
