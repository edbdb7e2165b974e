//! an unordered mapping from name to entry, serialized as newline-terminated
//! `kind hash name` records.

use crate::error::Result;
use crate::hash::{hash_bytes, ObjectId};
use anyhow::{bail, Context};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Blob => write!(f, "blob"),
            EntryKind::Tree => write!(f, "tree"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = crate::error::EnkelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(EntryKind::Blob),
            "tree" => Ok(EntryKind::Tree),
            _ => bail!("unknown tree entry kind `{}`", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: ObjectId,
    pub name: String,
}

/// a tree object: records are sorted by name so that serialization is deterministic
/// entry order isn't semantically meaningful, but identity is the hash of the bytes, so
/// a stable order is required to reproduce a hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn oid(&self) -> ObjectId {
        hash_bytes(self.serialize())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for entry in &self.entries {
            buf.extend_from_slice(format!("{} {} {}\n", entry.kind, entry.oid, entry.name).as_bytes());
        }
        buf
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).context("tree object is not valid utf8")?;
        let mut entries = Vec::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, ' ');
            let kind = parts.next().context("malformed tree record: missing kind")?.parse()?;
            let oid = parts.next().context("malformed tree record: missing hash")?.parse()?;
            let name = parts.next().context("malformed tree record: missing name")?.to_owned();
            entries.push(TreeEntry { kind, oid, name });
        }
        Ok(Self::new(entries))
    }
}

/// recognize an object's kind from the leading whitespace-delimited token of its
/// serialized bytes. anything other than a literal `commit` or `tree` prefix is a blob —
/// the sole fallback rule; there is no separate blob-vs-tree disambiguation beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    Commit,
    Tree,
    Blob,
}

pub fn detect_kind(bytes: &[u8]) -> ObjKind {
    let token = bytes.split(|&b| b == b' ' || b == b'\n').next().unwrap_or(b"");
    match token {
        b"commit" => ObjKind::Commit,
        b"tree" => ObjKind::Tree,
        _ => ObjKind::Blob,
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for EntryKind {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;
        if bool::arbitrary(g) { EntryKind::Blob } else { EntryKind::Tree }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for TreeEntry {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;
        use rand::distributions::Alphanumeric;
        use rand::Rng;
        let len = (usize::arbitrary(g) % 12) + 1;
        let name = rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect();
        Self { kind: EntryKind::arbitrary(g), oid: ObjectId::arbitrary(g), name }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Tree {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;
        let n = usize::arbitrary(g) % 6;
        Self::new((0..n).map(|_| TreeEntry::arbitrary(g)).collect())
    }
}
