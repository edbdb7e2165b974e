//! opaque file content. identity is simply `hash(content)` — no header is prepended.

use crate::hash::{hash_bytes, ObjectId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub content: Vec<u8>,
}

impl Blob {
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    pub fn oid(&self) -> ObjectId {
        hash_bytes(&self.content)
    }

    pub fn serialize(&self) -> &[u8] {
        &self.content
    }

    pub fn deserialize(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
