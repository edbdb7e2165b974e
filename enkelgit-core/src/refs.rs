//! named pointers: HEAD, branches, remote-tracking branches, MERGE_HEAD, FETCH_HEAD.
//!
//! Branch-name validation runs a `lazy_static` regex. A ref is just a qualified name
//! (`String`) — no interning or arena-backed lifetime machinery.

use crate::error::{EnkelErrorKind, Result};
use crate::hash::ObjectId;
use crate::lockfile;
use crate::odb::ObjectStore;
use anyhow::{anyhow, Context};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub const HEAD: &str = "HEAD";
pub const FETCH_HEAD: &str = "FETCH_HEAD";
pub const MERGE_HEAD: &str = "MERGE_HEAD";
pub const MERGE_MSG: &str = "MERGE_MSG";

lazy_static! {
    /// deliberately simplified: `[A-Za-z-]+`. Digits, underscores and slashes in a
    /// branch or remote name are rejected.
    static ref NAME_RE: Regex = Regex::new(r"^[A-Za-z-]+$").unwrap();
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// is `s` one of the recognized qualified ref forms?
pub fn is_ref(s: &str) -> bool {
    match s {
        HEAD | FETCH_HEAD | MERGE_HEAD => true,
        _ =>
            if let Some(name) = s.strip_prefix("refs/heads/") {
                is_valid_name(name)
            } else if let Some(rest) = s.strip_prefix("refs/remotes/") {
                match rest.split_once('/') {
                    Some((remote, branch)) => is_valid_name(remote) && is_valid_name(branch),
                    None => false,
                }
            } else {
                false
            },
    }
}

pub fn to_local_ref(name: &str) -> String {
    format!("refs/heads/{}", name)
}

pub fn to_remote_ref(remote: &str, name: &str) -> String {
    format!("refs/remotes/{}/{}", remote, name)
}

/// the content a ref file holds: a plain hash, or (HEAD only) a symbolic pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    Hash(ObjectId),
    Symbolic(String),
}

pub struct RefStore {
    /// the repository metadata root (`.enkelgit`, or the worktree root if bare).
    root: PathBuf,
}

impl RefStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, qualified: &str) -> PathBuf {
        self.root.join(qualified)
    }

    pub fn exists(&self, qualified: &str) -> bool {
        self.path_for(qualified).exists()
    }

    fn read_raw(&self, qualified: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(qualified)) {
            Ok(s) => Ok(Some(s.trim_end().to_owned())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write(&self, qualified: &str, content: &RefValue) -> Result<()> {
        let text = match content {
            RefValue::Hash(oid) => format!("{}\n", oid),
            RefValue::Symbolic(target) => format!("ref: {}\n", target),
        };
        lockfile::write_atomic(&self.path_for(qualified), text.as_bytes())
    }

    pub fn write_raw(&self, qualified: &str, text: &str) -> Result<()> {
        lockfile::write_atomic(&self.path_for(qualified), text.as_bytes())
    }

    pub fn remove(&self, qualified: &str) -> Result<()> {
        let path = self.path_for(qualified);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// resolve `r` to the qualified ref that actually holds content: HEAD resolves
    /// through its one symbolic hop (if attached); any other qualified ref is returned
    /// as-is; a bare name is assumed to be a local branch. No multi-hop chasing — HEAD
    /// is the only symbolic ref in this system.
    pub fn terminal_ref(&self, r: &str) -> Result<String> {
        if r == HEAD {
            return match self.read_raw(HEAD)? {
                Some(content) => match content.strip_prefix("ref: ") {
                    Some(target) => Ok(target.trim().to_owned()),
                    None => Ok(HEAD.to_owned()),
                },
                None => Ok(HEAD.to_owned()),
            };
        }
        if r.starts_with("refs/") || r == FETCH_HEAD || r == MERGE_HEAD {
            return Ok(r.to_owned());
        }
        Ok(to_local_ref(r))
    }

    /// resolves a hex hash, bare name, qualified ref, or `FETCH_HEAD` to an object id.
    pub fn hash(&self, store: &ObjectStore, x: &str) -> Result<Option<ObjectId>> {
        if let Ok(oid) = ObjectId::from_str(x) {
            if store.exists(oid) {
                return Ok(Some(oid));
            }
        }

        let t = self.terminal_ref(x)?;
        if t == FETCH_HEAD {
            let branch = self.head_branch_name()?.unwrap_or_default();
            return self.fetch_head_branch_to_merge(&branch);
        }

        match self.read_raw(&t)? {
            Some(content) => Ok(ObjectId::from_str(&content).ok()),
            None => Ok(None),
        }
    }

    pub fn is_head_detached(&self) -> Result<bool> {
        Ok(match self.read_raw(HEAD)? {
            Some(content) => !content.starts_with("ref: "),
            None => false,
        })
    }

    pub fn head_branch_name(&self) -> Result<Option<String>> {
        match self.read_raw(HEAD)? {
            Some(content) => Ok(content
                .strip_prefix("ref: ")
                .and_then(|r| r.trim().strip_prefix("refs/heads/"))
                .map(|s| s.to_owned())),
            None => Ok(None),
        }
    }

    pub fn is_checked_out(&self, name: &str) -> Result<bool> {
        Ok(self.head_branch_name()?.as_deref() == Some(name))
    }

    pub fn local_heads(&self) -> Result<BTreeMap<String, ObjectId>> {
        let dir = self.root.join("refs/heads");
        let mut out = BTreeMap::new();
        if !dir.exists() {
            return Ok(out);
        }
        for entry in fs::read_dir(&dir).with_context(|| format!("failed to read `{}`", dir.display()))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(content) = self.read_raw(&to_local_ref(&name))? {
                    out.insert(name, ObjectId::from_str(&content)?);
                }
            }
        }
        Ok(out)
    }

    /// parents for the next commit: HEAD alone, or HEAD plus MERGE_HEAD mid-merge.
    pub fn commit_parent_hashes(&self, store: &ObjectStore) -> Result<Vec<ObjectId>> {
        let head = match self.hash(store, HEAD)? {
            Some(h) => h,
            None => return Ok(vec![]),
        };
        match self.hash(store, MERGE_HEAD)? {
            Some(merge_head) => Ok(vec![head, merge_head]),
            None => Ok(vec![head]),
        }
    }

    /// parse `FETCH_HEAD` line-by-line (`<hash> branch <name> of <url>`) and return the
    /// hash on the line naming `name`.
    pub fn fetch_head_branch_to_merge(&self, name: &str) -> Result<Option<ObjectId>> {
        let Some(content) = self.read_raw(FETCH_HEAD)? else { return Ok(None) };
        let marker = format!(" branch {} of ", name);
        for line in content.lines() {
            if let Some(idx) = line.find(&marker) {
                return Ok(Some(ObjectId::from_str(&line[..idx])?));
            }
        }
        Ok(None)
    }

    pub fn merge_msg(&self) -> Result<Option<String>> {
        self.read_raw(MERGE_MSG)
    }

    pub fn append_fetch_head(&self, oid: ObjectId, branch: &str, url: &str) -> Result<()> {
        let mut existing = self.read_raw(FETCH_HEAD)?.unwrap_or_default();
        if !existing.is_empty() {
            existing.push('\n');
        }
        existing.push_str(&format!("{} branch {} of {}", oid, branch, url));
        self.write_raw(FETCH_HEAD, &existing)
    }

    pub fn require_hash(&self, store: &ObjectStore, x: &str) -> Result<ObjectId> {
        self.hash(store, x)?.ok_or_else(|| anyhow!(EnkelErrorKind::UnknownRef(x.to_owned())))
    }
}

pub fn validate_branch_name(name: &str) -> Result<()> {
    if !is_valid_name(name) {
        anyhow::bail!("invalid branch name `{}`", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
