//! Round-trip coverage for every reply variant.

use granary_docapi::*;
use granary_document::{BucketId, Document};

use crate::harness::{self, doc_id, roundtrip};

#[test]
fn test_feed_replies_roundtrip() {
    let registry = harness::registry();
    for body in [
        ReplyBody::Put(PutDocumentReply {
            highest_modification_timestamp: 99,
        }),
        ReplyBody::Remove(RemoveDocumentReply {
            highest_modification_timestamp: 0,
            was_found: true,
        }),
        ReplyBody::Remove(RemoveDocumentReply {
            highest_modification_timestamp: -1,
            was_found: false,
        }),
        ReplyBody::Update(UpdateDocumentReply {
            highest_modification_timestamp: i64::MAX,
            was_found: true,
        }),
    ] {
        roundtrip(&registry, &Routable::reply(body));
    }
}

#[test]
fn test_get_document_reply_with_document() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::Get(GetDocumentReply {
        document: Some(Document::new(
            doc_id("id:music:song::found"),
            "song",
            &b"title: Something"[..],
        )),
        last_modified: 1_724_130_001,
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_get_document_reply_without_document() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::Get(GetDocumentReply {
        document: None,
        last_modified: 0,
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_create_visitor_reply_roundtrip() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::CreateVisitor(CreateVisitorReply {
        last_bucket: BucketId::new(u64::MAX),
        buckets_visited: 10,
        documents_visited: 1000,
        bytes_visited: 1 << 40,
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_get_bucket_list_reply_roundtrip() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::GetBucketList(GetBucketListReply {
        buckets: vec![
            BucketInfoEntry {
                bucket: BucketId::new(1),
                info: "docs=7".into(),
            },
            BucketInfoEntry {
                bucket: BucketId::new(2),
                info: "".into(),
            },
        ],
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_get_bucket_state_reply_roundtrip() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::GetBucketState(GetBucketStateReply {
        states: vec![DocumentStateEntry {
            id: doc_id("id:music:song::gone"),
            timestamp: 1234,
            is_remove: true,
        }],
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_stat_bucket_reply_roundtrip() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::StatBucket(StatBucketReply {
        results: "count=12 size=4096".into(),
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_wrong_distribution_reply_roundtrip() {
    let registry = harness::registry();
    let reply = Routable::reply(ReplyBody::WrongDistribution(WrongDistributionReply {
        cluster_state: "version:7 storage:4 distributor:4".into(),
    }));
    roundtrip(&registry, &reply);
}

#[test]
fn test_empty_replies_roundtrip() {
    let registry = harness::registry();
    for body in [
        ReplyBody::DestroyVisitor(DestroyVisitorReply),
        ReplyBody::MapVisitor(MapVisitorReply),
        ReplyBody::VisitorInfo(VisitorInfoReply),
        ReplyBody::StatDocument(StatDocumentReply),
        ReplyBody::EmptyBuckets(EmptyBucketsReply),
        ReplyBody::DocumentList(DocumentListReply),
        ReplyBody::DocumentSummary(DocumentSummaryReply),
        ReplyBody::RemoveLocation(RemoveLocationReply),
        ReplyBody::SearchResult(SearchResultReply),
        ReplyBody::QueryResult(QueryResultReply),
    ] {
        let reply = Routable::reply(body);
        let bytes = harness::encode(&registry, &reply);
        assert!(bytes.is_empty(), "{} should have no payload", reply.kind());
        roundtrip(&registry, &reply);
    }
}
