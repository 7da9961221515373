//! Round-trip coverage for every message variant, plus the approx-size and
//! load-type contracts.

use bytes::Bytes;
use granary_docapi::routable::*;
use granary_docapi::*;
use granary_document::{BucketId, BucketSpace, Document, DocumentUpdate, GrowableBuffer};
use proptest::prelude::*;

use crate::harness::{self, doc_id, roundtrip};

fn default_load_type() -> granary_document::LoadType {
    harness::load_types().default_type().clone()
}

#[test]
fn test_put_document_roundtrip() {
    let registry = harness::registry();
    let id = doc_id("id:ns:type::123");
    let msg = Routable::message(MessageBody::Put(PutDocumentMessage {
        load_type: default_load_type(),
        document: Document::new(id.clone(), "type", &b"title: Come Together"[..]),
        timestamp: 1_724_130_000,
    }));

    let decoded = roundtrip(&registry, &msg);
    let Routable::Message(decoded) = decoded else {
        unreachable!()
    };
    let MessageBody::Put(put) = decoded.body else {
        panic!("wrong variant")
    };
    assert_eq!(put.document.id, id);
    assert_eq!(&put.document.content[..], b"title: Come Together");
    assert_eq!(put.timestamp, 1_724_130_000);
}

#[test]
fn test_remove_document_roundtrip() {
    let registry = harness::registry();
    let id = doc_id("id:ns:type::123");
    let msg = Routable::message(MessageBody::Remove(RemoveDocumentMessage {
        load_type: default_load_type(),
        id: id.clone(),
    }));

    let Routable::Message(decoded) = roundtrip(&registry, &msg) else {
        unreachable!()
    };
    let MessageBody::Remove(remove) = decoded.body else {
        panic!("wrong variant")
    };
    assert_eq!(remove.id, id);
}

#[test]
fn test_update_document_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::Update(UpdateDocumentMessage {
        load_type: harness::load_types().lookup(2).clone(),
        update: DocumentUpdate::new(doc_id("id:music:song::abbey/2"), "song", &b"assign"[..]),
        old_timestamp: 10,
        new_timestamp: 20,
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_get_document_roundtrip_with_boundary_values() {
    let registry = harness::registry();
    for field_set in ["", "[all]", "title,artist"] {
        let msg = Routable::message(MessageBody::Get(GetDocumentMessage {
            id: doc_id("id:ns:type::"),
            field_set: field_set.to_string(),
        }));
        roundtrip(&registry, &msg);
    }
}

#[test]
fn test_create_visitor_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::CreateVisitor(CreateVisitorMessage {
        library: "dumpvisitor".into(),
        instance_id: "visitor-17".into(),
        control_destination: "cluster/0".into(),
        data_destination: "client/7".into(),
        selection: "song.title".into(),
        max_pending: 32,
        from_timestamp: 0,
        to_timestamp: i64::MAX,
        visit_removes: true,
        field_set: "[all]".into(),
        visit_inconsistent: false,
        buckets: vec![BucketId::new(1), BucketId::new(u64::MAX)],
        parameters: vec![VisitorParameter {
            key: "chunk".into(),
            value: Bytes::from_static(b"\x00\x01\x02"),
        }],
        bucket_space: BucketSpace::new("global"),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_destroy_visitor_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::DestroyVisitor(DestroyVisitorMessage {
        instance_id: "visitor-17".into(),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_map_visitor_roundtrip_empty_and_full() {
    let registry = harness::registry();
    for parameters in [
        vec![],
        vec![VisitorParameter {
            key: "".into(),
            value: Bytes::new(),
        }],
    ] {
        let msg = Routable::message(MessageBody::MapVisitor(MapVisitorMessage { parameters }));
        roundtrip(&registry, &msg);
    }
}

#[test]
fn test_visitor_info_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::VisitorInfo(VisitorInfoMessage {
        finished_buckets: vec![BucketId::new(0), BucketId::new(42)],
        error_message: "".into(),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_get_bucket_list_roundtrip_with_default_space() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::GetBucketList(GetBucketListMessage {
        bucket: BucketId::new(0x8000_0000_0000_162e),
        bucket_space: BucketSpace::new("default"),
    }));

    let Routable::Message(decoded) = roundtrip(&registry, &msg) else {
        unreachable!()
    };
    let MessageBody::GetBucketList(got) = decoded.body else {
        panic!("wrong variant")
    };
    assert_eq!(got.bucket_space.name(), "default");
}

#[test]
fn test_get_bucket_state_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::GetBucketState(GetBucketStateMessage {
        bucket: BucketId::new(7),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_stat_bucket_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::StatBucket(StatBucketMessage {
        bucket: BucketId::new(9),
        selection: "song".into(),
        bucket_space: BucketSpace::default(),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_stat_document_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::StatDocument(StatDocumentMessage {
        id: doc_id("id:ns:type::stat-me"),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_empty_buckets_roundtrip() {
    let registry = harness::registry();
    for buckets in [vec![], vec![BucketId::new(1), BucketId::new(2)]] {
        let msg = Routable::message(MessageBody::EmptyBuckets(EmptyBucketsMessage { buckets }));
        roundtrip(&registry, &msg);
    }
}

#[test]
fn test_document_list_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::DocumentList(DocumentListMessage {
        bucket: BucketId::new(3),
        entries: vec![
            DocumentListEntry {
                timestamp: 100,
                is_remove: false,
                document: Document::new(doc_id("id:music:song::a"), "song", &b"x"[..]),
            },
            DocumentListEntry {
                timestamp: 101,
                is_remove: true,
                document: Document::new(doc_id("id:music:song::b"), "song", Bytes::new()),
            },
        ],
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_document_summary_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::DocumentSummary(DocumentSummaryMessage {
        entries: vec![SummaryEntry {
            id: doc_id("id:music:song::a"),
            summary: Bytes::from_static(b"snippet"),
        }],
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_remove_location_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::RemoveLocation(RemoveLocationMessage {
        selection: "song.year < 1960".into(),
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_search_result_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::SearchResult(SearchResultMessage {
        total_hits: 2,
        hits: vec![
            SearchHit {
                id: doc_id("id:music:song::a"),
                rank: i64::MAX,
            },
            SearchHit {
                id: doc_id("id:music:song::b"),
                rank: -1,
            },
        ],
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_query_result_roundtrip() {
    let registry = harness::registry();
    let msg = Routable::message(MessageBody::QueryResult(QueryResultMessage {
        total_hits: 1,
        hits: vec![QueryHit {
            id: doc_id("id:music:song::a"),
            rank: 0,
            summary: Bytes::from_static(b"summary bytes"),
        }],
    }));
    roundtrip(&registry, &msg);
}

#[test]
fn test_approx_size_with_synthetic_payload() {
    // GetBucketState carries exactly one u64: an 8-byte payload spelled out
    // by hand. The recorded approx size must be exactly those 8 bytes.
    let registry = harness::registry();
    let payload = hex::decode("800000000000162e").unwrap();
    let decoded = harness::decode(&registry, MESSAGE_GETBUCKETSTATE, &payload).unwrap();

    let Routable::Message(msg) = decoded else {
        panic!("expected message")
    };
    assert_eq!(msg.approx_size_bytes, 8);
    let MessageBody::GetBucketState(state) = msg.body else {
        panic!("wrong variant")
    };
    assert_eq!(state.bucket, BucketId::new(0x8000_0000_0000_162e));
}

#[test]
fn test_unknown_load_type_decodes_as_default() {
    // Hand-build a remove payload with load-type id 99, which no load-type
    // set in the harness declares.
    let registry = harness::registry();
    let mut out = GrowableBuffer::new();
    out.put_u32(99);
    let id_text = "id:ns:type::x";
    out.put_i32(id_text.len() as i32);
    out.put_slice(id_text.as_bytes());

    let decoded = harness::decode(&registry, MESSAGE_REMOVEDOCUMENT, out.as_slice()).unwrap();
    let Routable::Message(msg) = decoded else {
        panic!("expected message")
    };
    let MessageBody::Remove(remove) = msg.body else {
        panic!("wrong variant")
    };
    assert_eq!(remove.load_type.name, "default");
}

proptest! {
    #[test]
    fn prop_get_document_roundtrip(
        user in "[a-zA-Z0-9/_-]{0,24}",
        field_set in "[a-z,\\[\\]]{0,16}",
    ) {
        let registry = harness::registry();
        let msg = Routable::message(MessageBody::Get(GetDocumentMessage {
            id: doc_id(&format!("id:ns:type::{user}")),
            field_set,
        }));
        roundtrip(&registry, &msg);
    }

    #[test]
    fn prop_visitor_info_roundtrip(
        buckets in proptest::collection::vec(any::<u64>(), 0..8),
        error_message in ".{0,32}",
    ) {
        let registry = harness::registry();
        let msg = Routable::message(MessageBody::VisitorInfo(VisitorInfoMessage {
            finished_buckets: buckets.into_iter().map(BucketId::new).collect(),
            error_message,
        }));
        roundtrip(&registry, &msg);
    }

    #[test]
    fn prop_update_timestamps_roundtrip(old in any::<i64>(), new in any::<i64>()) {
        let registry = harness::registry();
        let msg = Routable::message(MessageBody::Update(UpdateDocumentMessage {
            load_type: default_load_type(),
            update: DocumentUpdate::new(doc_id("id:music:song::p"), "song", Bytes::new()),
            old_timestamp: old,
            new_timestamp: new,
        }));
        roundtrip(&registry, &msg);
    }
}
