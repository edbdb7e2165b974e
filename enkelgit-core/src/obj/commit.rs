//! a tuple of (tree, parents, message, timestamp). serialized with a fixed header
//! layout: `commit <tree>\n`, then zero or more `parent <hash>\n`, then
//! `Date:  <timestamp>\n\n    <message>\n`.

use crate::error::Result;
use crate::hash::{hash_bytes, ObjectId};
use anyhow::{bail, Context};
#[cfg(test)]
use quickcheck::Arbitrary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
    pub message: String,
    /// free-form human-readable timestamp. Participates in hashing, so two otherwise
    /// identical commits made a second apart have different identities.
    pub timestamp: String,
}

impl Commit {
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, message: String, timestamp: String) -> Self {
        Self { tree, parents, message, timestamp }
    }

    pub fn oid(&self) -> ObjectId {
        hash_bytes(self.serialize())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = format!("commit {}\n", self.tree);
        for parent in &self.parents {
            buf.push_str(&format!("parent {}\n", parent));
        }
        buf.push_str(&format!("Date:  {}\n\n    {}\n", self.timestamp, self.message));
        buf.into_bytes()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).context("commit object is not valid utf8")?;
        let mut lines = text.lines();

        let tree_line = lines.next().context("empty commit object")?;
        let tree = tree_line
            .strip_prefix("commit ")
            .context("commit object missing `commit <tree>` header")?
            .parse()?;

        let mut parents = Vec::new();
        let mut date_line = None;
        for line in lines.by_ref() {
            if let Some(rest) = line.strip_prefix("parent ") {
                parents.push(rest.parse()?);
            } else if let Some(rest) = line.strip_prefix("Date:  ") {
                date_line = Some(rest.to_owned());
                break;
            } else {
                bail!("malformed commit object: unexpected line `{}`", line);
            }
        }
        let timestamp = date_line.context("commit object missing `Date:` header")?;

        lines.next(); // blank separator line
        let message = lines
            .next()
            .and_then(|l| l.strip_prefix("    "))
            .context("commit object missing indented message")?
            .to_owned();

        Ok(Self { tree, parents, message, timestamp })
    }
}

#[cfg(test)]
fn arbitrary_line(g: &mut quickcheck::Gen) -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    let len = (usize::arbitrary(g) % 40) + 1;
    rand::thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
impl quickcheck::Arbitrary for Commit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_parents = usize::arbitrary(g) % 3;
        let parents = (0..num_parents).map(|_| ObjectId::arbitrary(g)).collect();
        Self {
            tree: ObjectId::arbitrary(g),
            parents,
            message: arbitrary_line(g),
            timestamp: arbitrary_line(g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;

    #[quickcheck_macros::quickcheck]
    fn serialize_then_deserialize_roundtrips_for_any_commit(commit: Commit) -> bool {
        Commit::deserialize(&commit.serialize()).map_or(false, |parsed| parsed == commit)
    }

    #[test]
    fn serialize_deserialize_round_trips() {
        let commit = Commit::new(
            hash_bytes(b"tree"),
            vec![hash_bytes(b"parent1"), hash_bytes(b"parent2")],
            "a merge commit".into(),
            "Tue Jul 28 2026 12:00:00".into(),
        );
        let bytes = commit.serialize();
        assert_eq!(Commit::deserialize(&bytes).unwrap(), commit);
    }

    #[test]
    fn root_commit_has_no_parents() {
        let commit = Commit::new(hash_bytes(b"tree"), vec![], "first".into(), "now".into());
        assert!(Commit::deserialize(&commit.serialize()).unwrap().parents.is_empty());
    }

    #[test]
    fn differing_timestamps_change_identity() {
        let a = Commit::new(hash_bytes(b"t"), vec![], "msg".into(), "t1".into());
        let b = Commit::new(hash_bytes(b"t"), vec![], "msg".into(), "t2".into());
        assert_ne!(a.oid(), b.oid());
    }
}
