//! content hashing: the identity of every object is the sha1 of its serialized bytes.

use crate::error::Result;
use sha1::{Digest, Sha1};
use std::convert::TryInto;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

pub const OID_SIZE: usize = 20;

/// a content-derived identifier: the sha1 hex digest of an object's serialized bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectId([u8; OID_SIZE]);

impl ObjectId {
    #[inline]
    pub fn new(bytes: [u8; OID_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; OID_SIZE] {
        &self.0
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// the first 7 hex characters, for human-facing short display.
    pub fn short(self) -> String {
        self.to_hex()[..7].to_owned()
    }
}

/// hash the serialized bytes of an object. used as the sole source of object identity.
pub fn hash_bytes(bytes: impl AsRef<[u8]>) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    let digest: [u8; OID_SIZE] = hasher.finalize().as_slice().try_into().expect("sha1 is 20 bytes");
    ObjectId::new(digest)
}

impl FromStr for ObjectId {
    type Err = crate::error::EnkelError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim_end();
        anyhow::ensure!(s.len() == 40, "invalid hash `{}` (expected 40 hex characters)", s);
        let bytes = hex::decode(s)?;
        Ok(Self(bytes.try_into().map_err(|_| anyhow::anyhow!("invalid hash `{}`", s))?))
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() { write!(f, "{}", self.short()) } else { write!(f, "{}", self.to_hex()) }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for ObjectId {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut bytes = [0u8; OID_SIZE];
        for b in bytes.iter_mut() {
            *b = u8::arbitrary(g);
        }
        Self(bytes)
    }
}
