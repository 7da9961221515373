//! Per-variant message codecs.
//!
//! Each codec defines the exact ordered field layout for one message kind;
//! decode reads fields in precisely the order encode wrote them, which is
//! the whole correctness contract. Codecs that embed documents or
//! schema-typed fields hold a shared reference to the document type catalog
//! and consult it read-only during decode.

use std::sync::Arc;

use granary_document::{
    BucketId, BucketSpace, ByteCursor, DocumentTypeCatalog, GrowableBuffer, LoadTypeSet,
};

use crate::factory::{
    decode_document, decode_feed_header, encode_document, encode_feed_header, MessageCodec,
};
use crate::messages::*;
use crate::primitives::{self, decode_count};
use crate::{CodecError, CodecResult};

// -- Shared list helpers --

fn encode_buckets(buckets: &[BucketId], out: &mut GrowableBuffer) {
    out.put_i32(buckets.len() as i32);
    for bucket in buckets {
        out.put_u64(bucket.raw());
    }
}

fn decode_buckets(buf: &mut ByteCursor<'_>) -> CodecResult<Vec<BucketId>> {
    let count = decode_count(buf, 8)?;
    let mut buckets = Vec::with_capacity(count);
    for _ in 0..count {
        buckets.push(BucketId::new(buf.read_u64()?));
    }
    Ok(buckets)
}

fn encode_parameters(params: &[VisitorParameter], out: &mut GrowableBuffer) {
    out.put_i32(params.len() as i32);
    for param in params {
        primitives::put_string(out, &param.key);
        primitives::put_bytes(out, &param.value);
    }
}

fn decode_parameters(buf: &mut ByteCursor<'_>) -> CodecResult<Vec<VisitorParameter>> {
    // Smallest parameter: two empty length prefixes.
    let count = decode_count(buf, 8)?;
    let mut params = Vec::with_capacity(count);
    for _ in 0..count {
        params.push(VisitorParameter {
            key: primitives::decode_string(buf)?,
            value: primitives::decode_bytes(buf)?,
        });
    }
    Ok(params)
}

/// Resolve the leading document-type name of a selection expression.
/// An empty selection means "everything" and needs no catalog check.
fn check_selection(catalog: &DocumentTypeCatalog, selection: &str) -> CodecResult<()> {
    if selection.is_empty() {
        return Ok(());
    }
    let end = selection
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(selection.len());
    let type_name = &selection[..end];
    if catalog.resolve(type_name).is_none() {
        return Err(CodecError::UnknownDocumentType(type_name.to_string()));
    }
    Ok(())
}

// -- Feed family --

/// Layout: feed header, document, timestamp i64.
pub struct PutDocumentCodec {
    catalog: Arc<DocumentTypeCatalog>,
}

impl PutDocumentCodec {
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl MessageCodec for PutDocumentCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::Put(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "PutDocument",
                got: body.kind(),
            });
        };
        encode_feed_header(&msg.load_type, out);
        encode_document(&msg.document, out);
        out.put_i64(msg.timestamp);
        Ok(())
    }

    fn decode_body(
        &self,
        buf: &mut ByteCursor<'_>,
        ctx: &LoadTypeSet,
    ) -> CodecResult<MessageBody> {
        let load_type = decode_feed_header(buf, ctx)?;
        let document = decode_document(buf, &self.catalog)?;
        let timestamp = primitives::decode_long(buf)?;
        Ok(MessageBody::Put(PutDocumentMessage {
            load_type,
            document,
            timestamp,
        }))
    }
}

/// Layout: feed header, document id.
pub struct RemoveDocumentCodec;

impl MessageCodec for RemoveDocumentCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::Remove(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "RemoveDocument",
                got: body.kind(),
            });
        };
        encode_feed_header(&msg.load_type, out);
        primitives::put_document_id(out, &msg.id);
        Ok(())
    }

    fn decode_body(
        &self,
        buf: &mut ByteCursor<'_>,
        ctx: &LoadTypeSet,
    ) -> CodecResult<MessageBody> {
        let load_type = decode_feed_header(buf, ctx)?;
        let id = primitives::decode_document_id(buf)?;
        Ok(MessageBody::Remove(RemoveDocumentMessage { load_type, id }))
    }
}

/// Layout: feed header, update, old timestamp i64, new timestamp i64.
pub struct UpdateDocumentCodec {
    catalog: Arc<DocumentTypeCatalog>,
}

impl UpdateDocumentCodec {
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl MessageCodec for UpdateDocumentCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::Update(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "UpdateDocument",
                got: body.kind(),
            });
        };
        encode_feed_header(&msg.load_type, out);
        primitives::put_string(out, &msg.update.type_name);
        primitives::put_document_id(out, &msg.update.id);
        primitives::put_bytes(out, &msg.update.content);
        out.put_i64(msg.old_timestamp);
        out.put_i64(msg.new_timestamp);
        Ok(())
    }

    fn decode_body(
        &self,
        buf: &mut ByteCursor<'_>,
        ctx: &LoadTypeSet,
    ) -> CodecResult<MessageBody> {
        let load_type = decode_feed_header(buf, ctx)?;
        let type_name = primitives::decode_string(buf)?;
        if self.catalog.resolve(&type_name).is_none() {
            return Err(CodecError::UnknownDocumentType(type_name));
        }
        let id = primitives::decode_document_id(buf)?;
        let content = primitives::decode_bytes(buf)?;
        let old_timestamp = primitives::decode_long(buf)?;
        let new_timestamp = primitives::decode_long(buf)?;
        Ok(MessageBody::Update(UpdateDocumentMessage {
            load_type,
            update: granary_document::DocumentUpdate {
                id,
                type_name,
                content,
            },
            old_timestamp,
            new_timestamp,
        }))
    }
}

// -- Point reads --

/// Layout: document id, field-set string.
pub struct GetDocumentCodec;

impl MessageCodec for GetDocumentCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::Get(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetDocument",
                got: body.kind(),
            });
        };
        primitives::put_document_id(out, &msg.id);
        primitives::put_string(out, &msg.field_set);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::Get(GetDocumentMessage {
            id: primitives::decode_document_id(buf)?,
            field_set: primitives::decode_string(buf)?,
        }))
    }
}

/// Layout: document id.
pub struct StatDocumentCodec;

impl MessageCodec for StatDocumentCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::StatDocument(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "StatDocument",
                got: body.kind(),
            });
        };
        primitives::put_document_id(out, &msg.id);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::StatDocument(StatDocumentMessage {
            id: primitives::decode_document_id(buf)?,
        }))
    }
}

// -- Visitor lifecycle --

/// Layout: library, instance id, control destination, data destination,
/// selection, max pending i32, from/to timestamps i64, visit_removes bool,
/// field set, visit_inconsistent bool, bucket list, parameter list,
/// bucket space.
pub struct CreateVisitorCodec {
    catalog: Arc<DocumentTypeCatalog>,
}

impl CreateVisitorCodec {
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl MessageCodec for CreateVisitorCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::CreateVisitor(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "CreateVisitor",
                got: body.kind(),
            });
        };
        primitives::put_string(out, &msg.library);
        primitives::put_string(out, &msg.instance_id);
        primitives::put_string(out, &msg.control_destination);
        primitives::put_string(out, &msg.data_destination);
        primitives::put_string(out, &msg.selection);
        out.put_i32(msg.max_pending);
        out.put_i64(msg.from_timestamp);
        out.put_i64(msg.to_timestamp);
        primitives::put_bool(out, msg.visit_removes);
        primitives::put_string(out, &msg.field_set);
        primitives::put_bool(out, msg.visit_inconsistent);
        encode_buckets(&msg.buckets, out);
        encode_parameters(&msg.parameters, out);
        primitives::put_bucket_space(out, &msg.bucket_space);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        let library = primitives::decode_string(buf)?;
        let instance_id = primitives::decode_string(buf)?;
        let control_destination = primitives::decode_string(buf)?;
        let data_destination = primitives::decode_string(buf)?;
        let selection = primitives::decode_string(buf)?;
        check_selection(&self.catalog, &selection)?;
        let max_pending = primitives::decode_int(buf)?;
        let from_timestamp = primitives::decode_long(buf)?;
        let to_timestamp = primitives::decode_long(buf)?;
        let visit_removes = primitives::decode_bool(buf)?;
        let field_set = primitives::decode_string(buf)?;
        let visit_inconsistent = primitives::decode_bool(buf)?;
        let buckets = decode_buckets(buf)?;
        let parameters = decode_parameters(buf)?;
        let bucket_space = primitives::decode_bucket_space(buf)?;
        Ok(MessageBody::CreateVisitor(CreateVisitorMessage {
            library,
            instance_id,
            control_destination,
            data_destination,
            selection,
            max_pending,
            from_timestamp,
            to_timestamp,
            visit_removes,
            field_set,
            visit_inconsistent,
            buckets,
            parameters,
            bucket_space,
        }))
    }
}

/// Layout: instance id string.
pub struct DestroyVisitorCodec;

impl MessageCodec for DestroyVisitorCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::DestroyVisitor(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "DestroyVisitor",
                got: body.kind(),
            });
        };
        primitives::put_string(out, &msg.instance_id);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::DestroyVisitor(DestroyVisitorMessage {
            instance_id: primitives::decode_string(buf)?,
        }))
    }
}

/// Layout: parameter list.
pub struct MapVisitorCodec;

impl MessageCodec for MapVisitorCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::MapVisitor(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "MapVisitor",
                got: body.kind(),
            });
        };
        encode_parameters(&msg.parameters, out);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::MapVisitor(MapVisitorMessage {
            parameters: decode_parameters(buf)?,
        }))
    }
}

/// Layout: finished bucket list, error message string.
pub struct VisitorInfoCodec;

impl MessageCodec for VisitorInfoCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::VisitorInfo(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "VisitorInfo",
                got: body.kind(),
            });
        };
        encode_buckets(&msg.finished_buckets, out);
        primitives::put_string(out, &msg.error_message);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::VisitorInfo(VisitorInfoMessage {
            finished_buckets: decode_buckets(buf)?,
            error_message: primitives::decode_string(buf)?,
        }))
    }
}

// -- Bucket queries --

/// Overridable bucket-space representation, shared by the two bucket-query
/// codecs that carry one. The default is the length-prefixed textual token;
/// a future protocol generation can override just this seam without touching
/// the rest of either payload.
pub trait BucketSpaceCodec {
    fn encode_bucket_space(&self, space: &BucketSpace, out: &mut GrowableBuffer) -> CodecResult<()> {
        primitives::put_bucket_space(out, space);
        Ok(())
    }

    fn decode_bucket_space(&self, buf: &mut ByteCursor<'_>) -> CodecResult<BucketSpace> {
        primitives::decode_bucket_space(buf)
    }
}

/// Layout: bucket id u64, bucket space (via [`BucketSpaceCodec`]).
pub struct GetBucketListCodec;

impl BucketSpaceCodec for GetBucketListCodec {}

impl MessageCodec for GetBucketListCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::GetBucketList(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetBucketList",
                got: body.kind(),
            });
        };
        out.put_u64(msg.bucket.raw());
        self.encode_bucket_space(&msg.bucket_space, out)
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::GetBucketList(GetBucketListMessage {
            bucket: BucketId::new(buf.read_u64()?),
            bucket_space: self.decode_bucket_space(buf)?,
        }))
    }
}

/// Layout: bucket id u64.
pub struct GetBucketStateCodec;

impl MessageCodec for GetBucketStateCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::GetBucketState(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "GetBucketState",
                got: body.kind(),
            });
        };
        out.put_u64(msg.bucket.raw());
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::GetBucketState(GetBucketStateMessage {
            bucket: BucketId::new(buf.read_u64()?),
        }))
    }
}

/// Layout: bucket id u64, selection string, bucket space (via seam).
pub struct StatBucketCodec;

impl BucketSpaceCodec for StatBucketCodec {}

impl MessageCodec for StatBucketCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::StatBucket(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "StatBucket",
                got: body.kind(),
            });
        };
        out.put_u64(msg.bucket.raw());
        primitives::put_string(out, &msg.selection);
        self.encode_bucket_space(&msg.bucket_space, out)
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::StatBucket(StatBucketMessage {
            bucket: BucketId::new(buf.read_u64()?),
            selection: primitives::decode_string(buf)?,
            bucket_space: self.decode_bucket_space(buf)?,
        }))
    }
}

/// Layout: bucket list.
pub struct EmptyBucketsCodec;

impl MessageCodec for EmptyBucketsCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::EmptyBuckets(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "EmptyBuckets",
                got: body.kind(),
            });
        };
        encode_buckets(&msg.buckets, out);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::EmptyBuckets(EmptyBucketsMessage {
            buckets: decode_buckets(buf)?,
        }))
    }
}

// -- Listing and bulk --

/// Layout: bucket id u64, entry count i32, then per entry: timestamp i64,
/// is_remove bool, document.
pub struct DocumentListCodec {
    catalog: Arc<DocumentTypeCatalog>,
}

impl DocumentListCodec {
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl MessageCodec for DocumentListCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::DocumentList(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "DocumentList",
                got: body.kind(),
            });
        };
        out.put_u64(msg.bucket.raw());
        out.put_i32(msg.entries.len() as i32);
        for entry in &msg.entries {
            out.put_i64(entry.timestamp);
            primitives::put_bool(out, entry.is_remove);
            encode_document(&entry.document, out);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        let bucket = BucketId::new(buf.read_u64()?);
        // Smallest entry: timestamp + bool + three empty prefixes.
        let count = decode_count(buf, 8 + 1 + 12)?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(DocumentListEntry {
                timestamp: primitives::decode_long(buf)?,
                is_remove: primitives::decode_bool(buf)?,
                document: decode_document(buf, &self.catalog)?,
            });
        }
        Ok(MessageBody::DocumentList(DocumentListMessage {
            bucket,
            entries,
        }))
    }
}

/// Layout: entry count i32, then per entry: document id, summary blob.
pub struct DocumentSummaryCodec;

impl MessageCodec for DocumentSummaryCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::DocumentSummary(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "DocumentSummary",
                got: body.kind(),
            });
        };
        out.put_i32(msg.entries.len() as i32);
        for entry in &msg.entries {
            primitives::put_document_id(out, &entry.id);
            primitives::put_bytes(out, &entry.summary);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        let count = decode_count(buf, 8)?;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(SummaryEntry {
                id: primitives::decode_document_id(buf)?,
                summary: primitives::decode_bytes(buf)?,
            });
        }
        Ok(MessageBody::DocumentSummary(DocumentSummaryMessage {
            entries,
        }))
    }
}

/// Layout: selection string.
pub struct RemoveLocationCodec;

impl MessageCodec for RemoveLocationCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::RemoveLocation(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "RemoveLocation",
                got: body.kind(),
            });
        };
        primitives::put_string(out, &msg.selection);
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        Ok(MessageBody::RemoveLocation(RemoveLocationMessage {
            selection: primitives::decode_string(buf)?,
        }))
    }
}

// -- Search / query results --

/// Layout: total hits i64, hit count i32, then per hit: document id, rank i64.
pub struct SearchResultCodec;

impl MessageCodec for SearchResultCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::SearchResult(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "SearchResult",
                got: body.kind(),
            });
        };
        out.put_i64(msg.total_hits);
        out.put_i32(msg.hits.len() as i32);
        for hit in &msg.hits {
            primitives::put_document_id(out, &hit.id);
            out.put_i64(hit.rank);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        let total_hits = primitives::decode_long(buf)?;
        let count = decode_count(buf, 12)?;
        let mut hits = Vec::with_capacity(count);
        for _ in 0..count {
            hits.push(SearchHit {
                id: primitives::decode_document_id(buf)?,
                rank: primitives::decode_long(buf)?,
            });
        }
        Ok(MessageBody::SearchResult(SearchResultMessage {
            total_hits,
            hits,
        }))
    }
}

/// Layout: total hits i64, hit count i32, then per hit: document id, rank
/// i64, summary blob.
pub struct QueryResultCodec;

impl MessageCodec for QueryResultCodec {
    fn encode_body(&self, body: &MessageBody, out: &mut GrowableBuffer) -> CodecResult<()> {
        let MessageBody::QueryResult(msg) = body else {
            return Err(CodecError::TypeMismatch {
                expected: "QueryResult",
                got: body.kind(),
            });
        };
        out.put_i64(msg.total_hits);
        out.put_i32(msg.hits.len() as i32);
        for hit in &msg.hits {
            primitives::put_document_id(out, &hit.id);
            out.put_i64(hit.rank);
            primitives::put_bytes(out, &hit.summary);
        }
        Ok(())
    }

    fn decode_body(&self, buf: &mut ByteCursor<'_>, _ctx: &LoadTypeSet) -> CodecResult<MessageBody> {
        let total_hits = primitives::decode_long(buf)?;
        let count = decode_count(buf, 16)?;
        let mut hits = Vec::with_capacity(count);
        for _ in 0..count {
            hits.push(QueryHit {
                id: primitives::decode_document_id(buf)?,
                rank: primitives::decode_long(buf)?,
                summary: primitives::decode_bytes(buf)?,
            });
        }
        Ok(MessageBody::QueryResult(QueryResultMessage {
            total_hits,
            hits,
        }))
    }
}
