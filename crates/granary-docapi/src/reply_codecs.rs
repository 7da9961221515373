//! Per-variant reply codecs.
//!
//! The feed replies share the highest-modification-timestamp preamble; the
//! visitor/list/summary/result acks carry no payload at all, so their codecs
//! are generated by `empty_reply_codec!` and write nothing.

use std::sync::Arc;

use granary_document::{BucketId, ByteCursor, DocumentTypeCatalog, GrowableBuffer};

use crate::factory::{
    decode_document, decode_feed_reply_header, encode_document, encode_feed_reply_header,
    ReplyCodec,
};
use crate::primitives::{self, decode_count};
use crate::replies::*;
use crate::{CodecError, CodecResult};

/// Generate a codec for a reply variant with an empty payload.
macro_rules! empty_reply_codec {
    ($codec:ident, $variant:ident, $reply:ident, $name:literal) => {
        pub struct $codec;

        impl ReplyCodec for $codec {
            fn encode_body(&self, body: &ReplyBody, _out: &mut GrowableBuffer) -> CodecResult<()> {
                let ReplyBody::$variant(_) = body else {
                    return Err(CodecError::TypeMismatch {
                        expected: $name,
                        got: body.kind(),
                    });
                };
                Ok(())
            }

            fn decode_body(&self, _buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
                Ok(ReplyBody::$variant($reply))
            }
        }
    };
}

empty_reply_codec!(
    DestroyVisitorReplyCodec,
    DestroyVisitor,
    DestroyVisitorReply,
    "DestroyVisitorReply"
);
empty_reply_codec!(
    MapVisitorReplyCodec,
    MapVisitor,
    MapVisitorReply,
    "MapVisitorReply"
);
empty_reply_codec!(
    VisitorInfoReplyCodec,
    VisitorInfo,
    VisitorInfoReply,
    "VisitorInfoReply"
);
empty_reply_codec!(
    StatDocumentReplyCodec,
    StatDocument,
    StatDocumentReply,
    "StatDocumentReply"
);
empty_reply_codec!(
    EmptyBucketsReplyCodec,
    EmptyBuckets,
    EmptyBucketsReply,
    "EmptyBucketsReply"
);
empty_reply_codec!(
    DocumentListReplyCodec,
    DocumentList,
    DocumentListReply,
    "DocumentListReply"
);
empty_reply_codec!(
    DocumentSummaryReplyCodec,
    DocumentSummary,
    DocumentSummaryReply,
    "DocumentSummaryReply"
);
empty_reply_codec!(
    RemoveLocationReplyCodec,
    RemoveLocation,
    RemoveLocationReply,
    "RemoveLocationReply"
);
empty_reply_codec!(
    SearchResultReplyCodec,
    SearchResult,
    SearchResultReply,
    "SearchResultReply"
);
empty_reply_codec!(
    QueryResultReplyCodec,
    QueryResult,
    QueryResultReply,
    "QueryResultReply"
);

// -- Feed family --

/// Layout: feed-reply header only.
pub struct PutDocumentReplyCodec;

impl ReplyCodec for PutDocumentReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::Put(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "PutDocumentReply",
                got: body.kind(),
            });
        };
        encode_feed_reply_header(reply.highest_modification_timestamp, out);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::Put(PutDocumentReply {
            highest_modification_timestamp: decode_feed_reply_header(buf)?,
        }))
    }
}

/// Layout: feed-reply header, was_found bool.
pub struct RemoveDocumentReplyCodec;

impl ReplyCodec for RemoveDocumentReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::Remove(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "RemoveDocumentReply",
                got: body.kind(),
            });
        };
        encode_feed_reply_header(reply.highest_modification_timestamp, out);
        primitives::put_bool(out, reply.was_found);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::Remove(RemoveDocumentReply {
            highest_modification_timestamp: decode_feed_reply_header(buf)?,
            was_found: primitives::decode_bool(buf)?,
        }))
    }
}

/// Layout: feed-reply header, was_found bool.
pub struct UpdateDocumentReplyCodec;

impl ReplyCodec for UpdateDocumentReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::Update(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "UpdateDocumentReply",
                got: body.kind(),
            });
        };
        encode_feed_reply_header(reply.highest_modification_timestamp, out);
        primitives::put_bool(out, reply.was_found);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::Update(UpdateDocumentReply {
            highest_modification_timestamp: decode_feed_reply_header(buf)?,
            was_found: primitives::decode_bool(buf)?,
        }))
    }
}

// -- Point reads --

/// Layout: has_document bool, document when present, last_modified i64.
pub struct GetDocumentReplyCodec {
    catalog: Arc<DocumentTypeCatalog>,
}

impl GetDocumentReplyCodec {
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl ReplyCodec for GetDocumentReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::Get(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetDocumentReply",
                got: body.kind(),
            });
        };
        primitives::put_bool(out, reply.document.is_some());
        if let Some(doc) = &reply.document {
            encode_document(doc, out);
        }
        out.put_i64(reply.last_modified);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        let document = if primitives::decode_bool(buf)? {
            Some(decode_document(buf, &self.catalog)?)
        } else {
            None
        };
        let last_modified = primitives::decode_long(buf)?;
        Ok(ReplyBody::Get(GetDocumentReply {
            document,
            last_modified,
        }))
    }
}

// -- Visitor lifecycle --

/// Layout: last bucket u64, buckets/documents/bytes visited i64 each.
pub struct CreateVisitorReplyCodec;

impl ReplyCodec for CreateVisitorReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::CreateVisitor(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "CreateVisitorReply",
                got: body.kind(),
            });
        };
        out.put_u64(reply.last_bucket.raw());
        out.put_i64(reply.buckets_visited);
        out.put_i64(reply.documents_visited);
        out.put_i64(reply.bytes_visited);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::CreateVisitor(CreateVisitorReply {
            last_bucket: BucketId::new(buf.read_u64()?),
            buckets_visited: primitives::decode_long(buf)?,
            documents_visited: primitives::decode_long(buf)?,
            bytes_visited: primitives::decode_long(buf)?,
        }))
    }
}

// -- Bucket queries --

/// Layout: entry count i32, then per entry: bucket u64, info string.
pub struct GetBucketListReplyCodec;

impl ReplyCodec for GetBucketListReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::GetBucketList(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetBucketListReply",
                got: body.kind(),
            });
        };
        out.put_i32(reply.buckets.len() as i32);
        for entry in &reply.buckets {
            out.put_u64(entry.bucket.raw());
            primitives::put_string(out, &entry.info);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        let count = decode_count(buf, 12)?;
        let mut buckets = Vec::with_capacity(count);
        for _ in 0..count {
            buckets.push(BucketInfoEntry {
                bucket: BucketId::new(buf.read_u64()?),
                info: primitives::decode_string(buf)?,
            });
        }
        Ok(ReplyBody::GetBucketList(GetBucketListReply { buckets }))
    }
}

/// Layout: entry count i32, then per entry: document id, timestamp i64,
/// is_remove bool.
pub struct GetBucketStateReplyCodec;

impl ReplyCodec for GetBucketStateReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::GetBucketState(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetBucketStateReply",
                got: body.kind(),
            });
        };
        out.put_i32(reply.states.len() as i32);
        for state in &reply.states {
            primitives::put_document_id(out, &state.id);
            out.put_i64(state.timestamp);
            primitives::put_bool(out, state.is_remove);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        let count = decode_count(buf, 13)?;
        let mut states = Vec::with_capacity(count);
        for _ in 0..count {
            states.push(DocumentStateEntry {
                id: primitives::decode_document_id(buf)?,
                timestamp: primitives::decode_long(buf)?,
                is_remove: primitives::decode_bool(buf)?,
            });
        }
        Ok(ReplyBody::GetBucketState(GetBucketStateReply { states }))
    }
}

/// Layout: results string.
pub struct StatBucketReplyCodec;

impl ReplyCodec for StatBucketReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::StatBucket(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "StatBucketReply",
                got: body.kind(),
            });
        };
        primitives::put_string(out, &reply.results);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::StatBucket(StatBucketReply {
            results: primitives::decode_string(buf)?,
        }))
    }
}

// -- Redistribution --

/// Layout: cluster-state string.
pub struct WrongDistributionReplyCodec;

impl ReplyCodec for WrongDistributionReplyCodec {
    fn encode_body(&self, body: &ReplyBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let ReplyBody::WrongDistribution(reply) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "WrongDistributionReply",
                got: body.kind(),
            });
        };
        primitives::put_string(out, &reply.cluster_state);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>) -> CodecResult<ReplyBody> {
        Ok(ReplyBody::WrongDistribution(WrongDistributionReply {
            cluster_state: primitives::decode_string(buf)?,
        }))
    }
}
