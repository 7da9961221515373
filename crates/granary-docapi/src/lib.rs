//! Granary DocAPI -- message-bus wire codec for document operations.
//!
//! Converts routable document operations and their replies (put, remove,
//! update, get, visitor lifecycle, bucket queries, search and query results)
//! to and from their binary bus form. One factory per variant, collected in
//! an immutable type-code registry that the transport consults on every
//! encode and decode.
//!
//! The type code itself travels in the transport's outer envelope; the
//! payload bytes produced here never contain it. All encode/decode calls are
//! synchronous, never panic across the crate boundary, and keep all per-call
//! state in the caller-supplied buffers.

pub mod factory;
pub mod message_codecs;
pub mod messages;
pub mod primitives;
pub mod registry;
pub mod replies;
pub mod reply_codecs;
pub mod routable;

pub use factory::{MessageCodec, MessageFactory, ReplyCodec, ReplyFactory, RoutableFactory};
pub use messages::*;
pub use registry::Registry;
pub use replies::*;
pub use routable::Routable;

use granary_document::BufferError;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{0}")]
    Buffer(#[from] BufferError),
    #[error("type mismatch: factory for {expected} was handed a {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),
    #[error("invalid utf-8 in string field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("{0}")]
    Document(#[from] granary_document::DocumentError),
    #[error("unknown document type '{0}'")]
    UnknownDocumentType(String),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
