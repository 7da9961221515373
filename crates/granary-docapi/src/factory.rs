//! Factory interface and the message/reply factory bases.
//!
//! `RoutableFactory` is the uniform contract the registry and transport see:
//! encode appends the wire form, decode turns bytes back into a routable, and
//! neither ever panics across the boundary. The two bases implement that
//! contract exactly once; variant codecs only supply the body hooks.
//!
//! Factories hold no per-call state. Everything mutable lives in the
//! caller-supplied buffers, so a factory is safe to share across threads for
//! the registry's whole lifetime.

use granary_document::{
    ByteCursor, Document, DocumentTypeCatalog, GrowableBuffer, LoadType, LoadTypeSet,
};

use crate::messages::{DocumentMessage, MessageBody};
use crate::primitives;
use crate::replies::{DocumentReply, ReplyBody};
use crate::routable::Routable;
use crate::{CodecError, CodecResult};

/// The uniform encode/decode contract for one routable variant.
pub trait RoutableFactory: Send + Sync {
    /// Append the routable's wire form to `out`. Fails with
    /// [`CodecError::TypeMismatch`] if the routable is not the variant this
    /// factory was registered for.
    fn encode(&self, routable: &Routable, out: &mut GrowableBuffer) -> CodecResult<()>;

    /// Read exactly the bytes a matching `encode` wrote. On failure the
    /// cursor position is undefined and the caller must discard the buffer.
    /// `ctx` is the opaque load-type context, forwarded unmodified to fields
    /// that need it.
    fn decode(&self, buf: &mut ByteCursor<'_>, ctx: &LoadTypeSet) -> CodecResult<Routable>;
}

/// Body hooks for one message variant. Implementations are guaranteed that
/// decode input was produced by their own encode; they must still treat the
/// bytes as untrusted.
pub trait MessageCodec: Send + Sync {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()>;
    fn decode_body(&self, buf: &mut ByteCursor<'_>, ctx: &LoadTypeSet)
        -> CodecResult<MessageBody>;
}

/// Body hooks for one reply variant.
pub trait ReplyCodec: Send + Sync {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()>;
    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody>;
}

/// Run a decode hook with approximate-size measurement around it.
///
/// The cursor delta is computed on the failure path as well as the success
/// path -- an explicit try/finally equivalent, so no early failure return in
/// a hook can skip the measurement.
fn measured<T>(
    buf: &mut ByteCursor<'_>,
    hook: impl FnOnce(&mut ByteCursor<'_>) -> CodecResult<T>,
) -> (CodecResult<T>, usize) {
    let before = buf.position();
    let result = hook(buf);
    let consumed = buf.position() - before;
    (result, consumed)
}

/// Implements [`RoutableFactory`] for a message variant codec: rejects
/// non-messages before the hook and stamps the approximate size (the exact
/// bytes consumed by this decode call) on every decoded message.
pub struct MessageFactory<C> {
    codec: C,
}

impl<C> MessageFactory<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl<C: MessageCodec> RoutableFactory for MessageFactory<C> {
    fn encode(&self, routable: &Routable, out: &mut GrowableBuffer) -> CodecResult<()> {
        let Routable::Message(msg) = routable else {
            return Err(CodecError::TypeMismatch {
                expected: "message",
                got: routable.kind(),
            });
        };
        self.codec.encode_body(&msg.body, out)
    }

    fn decode(&self, buf: &mut ByteCursor<'_>, ctx: &LoadTypeSet) -> CodecResult<Routable> {
        let (result, consumed) = measured(buf, |buf| self.codec.decode_body(buf, ctx));
        let body = result?;
        Ok(Routable::Message(DocumentMessage {
            approx_size_bytes: consumed as u32,
            body,
        }))
    }
}

/// Implements [`RoutableFactory`] for a reply variant codec.
pub struct ReplyFactory<C> {
    codec: C,
}

impl<C> ReplyFactory<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl<C: ReplyCodec> RoutableFactory for ReplyFactory<C> {
    fn encode(&self, routable: &Routable, out: &mut GrowableBuffer) -> CodecResult<()> {
        let Routable::Reply(reply) = routable else {
            return Err(CodecError::TypeMismatch {
                expected: "reply",
                got: routable.kind(),
            });
        };
        self.codec.encode_body(&reply.body, out)
    }

    fn decode(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<Routable> {
        Ok(Routable::Reply(DocumentReply::new(
            self.codec.decode_body(buf)?,
        )))
    }
}

// -- Feed mixin --
//
// Put, Remove and Update share a preamble: the load-type id, resolved
// through the caller's LoadTypeSet on decode. Their replies share the
// highest-modification-timestamp field.

pub(crate) fn encode_feed_header(load_type: &LoadType, out: &mut GrowableBuffer) {
    out.put_u32(load_type.id);
}

pub(crate) fn decode_feed_header(
    buf: &mut ByteCursor<'_>,
    ctx: &LoadTypeSet,
) -> CodecResult<LoadType> {
    let id = buf.read_u32()?;
    Ok(ctx.lookup(id).clone())
}

pub(crate) fn encode_feed_reply_header(
    highest_modification_timestamp: i64,
    out: &mut GrowableBuffer,
) {
    out.put_i64(highest_modification_timestamp);
}

pub(crate) fn decode_feed_reply_header(buf: &mut ByteCursor<'_>) -> CodecResult<i64> {
    primitives::decode_long(buf)
}

// -- Shared payload helpers used by more than one variant codec --

pub(crate) fn encode_document(doc: &Document, out: &mut GrowableBuffer) {
    primitives::put_string(out, &doc.type_name);
    primitives::put_document_id(out, &doc.id);
    primitives::put_bytes(out, &doc.content);
}

/// Decode a document, resolving its type name through the schema catalog.
/// An unresolvable type is malformed input, not a soft miss: the content
/// bytes cannot be interpreted downstream without a known type.
pub(crate) fn decode_document(
    buf: &mut ByteCursor<'_>,
    catalog: &DocumentTypeCatalog,
) -> CodecResult<Document> {
    let type_name = primitives::decode_string(buf)?;
    if catalog.resolve(&type_name).is_none() {
        return Err(CodecError::UnknownDocumentType(type_name));
    }
    let id = primitives::decode_document_id(buf)?;
    let content = primitives::decode_bytes(buf)?;
    Ok(Document {
        id,
        type_name,
        content,
    })
}
