//! Granary Document -- document-layer value types for the Granary platform.
//!
//! Identifiers, bucket references, the resolve-only schema catalog, load-type
//! classification, and the byte-buffer abstractions the wire codec reads and
//! writes through. No business semantics live here: document content is an
//! opaque blob owned by whoever produced it.

pub mod bucket;
pub mod buffer;
pub mod document;
pub mod id;
pub mod load_type;
pub mod schema;

pub use bucket::{BucketId, BucketSpace};
pub use buffer::{BufferError, ByteCursor, GrowableBuffer};
pub use document::{Document, DocumentUpdate};
pub use id::DocumentId;
pub use load_type::{LoadType, LoadTypeSet};
pub use schema::{DocumentType, DocumentTypeCatalog, FieldDef};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid document id '{text}': {reason}")]
    InvalidDocumentId { text: String, reason: &'static str },
    #[error("catalog config error: {0}")]
    CatalogConfig(#[from] serde_json::Error),
    #[error("duplicate document type '{0}' in catalog config")]
    DuplicateDocumentType(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
