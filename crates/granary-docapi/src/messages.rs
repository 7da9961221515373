//! Document message types -- the request half of the routable set.
//!
//! One struct per message kind, collected in [`MessageBody`]. The wrapper
//! [`DocumentMessage`] carries the approximate in-memory size stamped on
//! every decoded message by the factory base.

use bytes::Bytes;
use granary_document::{BucketId, BucketSpace, Document, DocumentId, DocumentUpdate, LoadType};

/// A document operation request.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMessage {
    /// Bytes consumed by this message's own decode call; 0 for messages
    /// built locally. Wire size is assumed close enough to in-memory size
    /// for the transport's memory-accounting decisions.
    pub approx_size_bytes: u32,
    pub body: MessageBody,
}

impl DocumentMessage {
    /// Wrap a locally constructed body (approx size unknown until decode).
    pub fn new(body: MessageBody) -> Self {
        Self {
            approx_size_bytes: 0,
            body,
        }
    }
}

/// Every message kind the protocol knows.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Put(PutDocumentMessage),
    Remove(RemoveDocumentMessage),
    Update(UpdateDocumentMessage),
    Get(GetDocumentMessage),
    CreateVisitor(CreateVisitorMessage),
    DestroyVisitor(DestroyVisitorMessage),
    MapVisitor(MapVisitorMessage),
    VisitorInfo(VisitorInfoMessage),
    GetBucketList(GetBucketListMessage),
    GetBucketState(GetBucketStateMessage),
    StatBucket(StatBucketMessage),
    StatDocument(StatDocumentMessage),
    EmptyBuckets(EmptyBucketsMessage),
    DocumentList(DocumentListMessage),
    DocumentSummary(DocumentSummaryMessage),
    RemoveLocation(RemoveLocationMessage),
    SearchResult(SearchResultMessage),
    QueryResult(QueryResultMessage),
}

impl MessageBody {
    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageBody::Put(_) => "PutDocument",
            MessageBody::Remove(_) => "RemoveDocument",
            MessageBody::Update(_) => "UpdateDocument",
            MessageBody::Get(_) => "GetDocument",
            MessageBody::CreateVisitor(_) => "CreateVisitor",
            MessageBody::DestroyVisitor(_) => "DestroyVisitor",
            MessageBody::MapVisitor(_) => "MapVisitor",
            MessageBody::VisitorInfo(_) => "VisitorInfo",
            MessageBody::GetBucketList(_) => "GetBucketList",
            MessageBody::GetBucketState(_) => "GetBucketState",
            MessageBody::StatBucket(_) => "StatBucket",
            MessageBody::StatDocument(_) => "StatDocument",
            MessageBody::EmptyBuckets(_) => "EmptyBuckets",
            MessageBody::DocumentList(_) => "DocumentList",
            MessageBody::DocumentSummary(_) => "DocumentSummary",
            MessageBody::RemoveLocation(_) => "RemoveLocation",
            MessageBody::SearchResult(_) => "SearchResult",
            MessageBody::QueryResult(_) => "QueryResult",
        }
    }
}

// -- Feed family (shared load-type header) --

#[derive(Debug, Clone, PartialEq)]
pub struct PutDocumentMessage {
    pub load_type: LoadType,
    pub document: Document,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveDocumentMessage {
    pub load_type: LoadType,
    pub id: DocumentId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDocumentMessage {
    pub load_type: LoadType,
    pub update: DocumentUpdate,
    pub old_timestamp: i64,
    pub new_timestamp: i64,
}

// -- Point reads --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDocumentMessage {
    pub id: DocumentId,
    /// Field-set expression selecting which fields the reply should carry.
    pub field_set: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDocumentMessage {
    pub id: DocumentId,
}

// -- Visitor lifecycle --

/// An opaque key/value visitor parameter. Kept as an ordered list so the
/// wire form is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorParameter {
    pub key: String,
    pub value: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVisitorMessage {
    pub library: String,
    pub instance_id: String,
    pub control_destination: String,
    pub data_destination: String,
    /// Document selection; when nonempty, its leading document-type name
    /// must resolve in the schema catalog.
    pub selection: String,
    pub max_pending: i32,
    pub from_timestamp: i64,
    pub to_timestamp: i64,
    pub visit_removes: bool,
    pub field_set: String,
    pub visit_inconsistent: bool,
    pub buckets: Vec<BucketId>,
    pub parameters: Vec<VisitorParameter>,
    pub bucket_space: BucketSpace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyVisitorMessage {
    pub instance_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapVisitorMessage {
    pub parameters: Vec<VisitorParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorInfoMessage {
    pub finished_buckets: Vec<BucketId>,
    pub error_message: String,
}

// -- Bucket queries --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBucketListMessage {
    pub bucket: BucketId,
    pub bucket_space: BucketSpace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBucketStateMessage {
    pub bucket: BucketId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBucketMessage {
    pub bucket: BucketId,
    pub selection: String,
    pub bucket_space: BucketSpace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBucketsMessage {
    pub buckets: Vec<BucketId>,
}

// -- Listing and bulk --

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentListEntry {
    pub timestamp: i64,
    pub is_remove: bool,
    pub document: Document,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentListMessage {
    pub bucket: BucketId,
    pub entries: Vec<DocumentListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub id: DocumentId,
    pub summary: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummaryMessage {
    pub entries: Vec<SummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLocationMessage {
    pub selection: String,
}

// -- Search / query results --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: DocumentId,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultMessage {
    pub total_hits: i64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    pub id: DocumentId,
    pub rank: i64,
    pub summary: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResultMessage {
    pub total_hits: i64,
    pub hits: Vec<QueryHit>,
}
