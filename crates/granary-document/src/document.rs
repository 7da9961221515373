//! Document and document-update payload carriers.
//!
//! Content is an opaque blob: the codec validates the type name against the
//! schema catalog but never interprets field data. `Bytes` keeps the decoded
//! content zero-copy-ish without tying the document to the input buffer's
//! lifetime.

use bytes::Bytes;

use crate::DocumentId;

/// A document as carried by put operations and get replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub type_name: String,
    pub content: Bytes,
}

impl Document {
    pub fn new(id: DocumentId, type_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            content: content.into(),
        }
    }
}

/// A partial-update payload as carried by update operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub id: DocumentId,
    pub type_name: String,
    pub content: Bytes,
}

impl DocumentUpdate {
    pub fn new(id: DocumentId, type_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            content: content.into(),
        }
    }
}
