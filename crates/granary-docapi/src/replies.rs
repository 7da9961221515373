//! Document reply types -- the response half of the routable set.
//!
//! One reply per message kind, plus [`WrongDistributionReply`] which has no
//! corresponding message. Most visitor/list/summary acks carry no payload at
//! all; those are unit structs and their codecs write nothing.

use granary_document::{BucketId, Document, DocumentId};

/// A document operation response.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReply {
    pub body: ReplyBody,
}

impl DocumentReply {
    pub fn new(body: ReplyBody) -> Self {
        Self { body }
    }
}

/// Every reply kind the protocol knows.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Put(PutDocumentReply),
    Remove(RemoveDocumentReply),
    Update(UpdateDocumentReply),
    Get(GetDocumentReply),
    CreateVisitor(CreateVisitorReply),
    DestroyVisitor(DestroyVisitorReply),
    MapVisitor(MapVisitorReply),
    VisitorInfo(VisitorInfoReply),
    GetBucketList(GetBucketListReply),
    GetBucketState(GetBucketStateReply),
    StatBucket(StatBucketReply),
    StatDocument(StatDocumentReply),
    EmptyBuckets(EmptyBucketsReply),
    DocumentList(DocumentListReply),
    DocumentSummary(DocumentSummaryReply),
    RemoveLocation(RemoveLocationReply),
    SearchResult(SearchResultReply),
    QueryResult(QueryResultReply),
    WrongDistribution(WrongDistributionReply),
}

impl ReplyBody {
    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyBody::Put(_) => "PutDocumentReply",
            ReplyBody::Remove(_) => "RemoveDocumentReply",
            ReplyBody::Update(_) => "UpdateDocumentReply",
            ReplyBody::Get(_) => "GetDocumentReply",
            ReplyBody::CreateVisitor(_) => "CreateVisitorReply",
            ReplyBody::DestroyVisitor(_) => "DestroyVisitorReply",
            ReplyBody::MapVisitor(_) => "MapVisitorReply",
            ReplyBody::VisitorInfo(_) => "VisitorInfoReply",
            ReplyBody::GetBucketList(_) => "GetBucketListReply",
            ReplyBody::GetBucketState(_) => "GetBucketStateReply",
            ReplyBody::StatBucket(_) => "StatBucketReply",
            ReplyBody::StatDocument(_) => "StatDocumentReply",
            ReplyBody::EmptyBuckets(_) => "EmptyBucketsReply",
            ReplyBody::DocumentList(_) => "DocumentListReply",
            ReplyBody::DocumentSummary(_) => "DocumentSummaryReply",
            ReplyBody::RemoveLocation(_) => "RemoveLocationReply",
            ReplyBody::SearchResult(_) => "SearchResultReply",
            ReplyBody::QueryResult(_) => "QueryResultReply",
            ReplyBody::WrongDistribution(_) => "WrongDistributionReply",
        }
    }
}

// -- Feed family (shared highest-modification-timestamp header) --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PutDocumentReply {
    pub highest_modification_timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveDocumentReply {
    pub highest_modification_timestamp: i64,
    /// Whether a document actually existed at the target id.
    pub was_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateDocumentReply {
    pub highest_modification_timestamp: i64,
    pub was_found: bool,
}

// -- Point reads --

#[derive(Debug, Clone, PartialEq)]
pub struct GetDocumentReply {
    pub document: Option<Document>,
    pub last_modified: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatDocumentReply;

// -- Visitor lifecycle --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateVisitorReply {
    pub last_bucket: BucketId,
    pub buckets_visited: i64,
    pub documents_visited: i64,
    pub bytes_visited: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestroyVisitorReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapVisitorReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisitorInfoReply;

// -- Bucket queries --

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfoEntry {
    pub bucket: BucketId,
    /// Opaque textual bucket metadata (document count, checksum, ...).
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetBucketListReply {
    pub buckets: Vec<BucketInfoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStateEntry {
    pub id: DocumentId,
    pub timestamp: i64,
    pub is_remove: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetBucketStateReply {
    pub states: Vec<DocumentStateEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatBucketReply {
    pub results: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyBucketsReply;

// -- Listing, bulk, results --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentListReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentSummaryReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveLocationReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchResultReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryResultReply;

// -- Redistribution --

/// Sent instead of a normal reply when the target no longer owns the bucket;
/// carries the cluster state string the sender should re-route against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongDistributionReply {
    pub cluster_state: String,
}
