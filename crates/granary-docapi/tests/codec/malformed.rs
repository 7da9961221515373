//! Failure-path contracts: malformed input isolation, type mismatches, and
//! the unknown-type-code outcome.

use bytes::Bytes;
use granary_docapi::routable::*;
use granary_docapi::*;
use granary_document::{BucketId, BucketSpace, Document};

use crate::harness::{self, doc_id};

fn sample_messages() -> Vec<Routable> {
    let lt = harness::load_types().default_type().clone();
    vec![
        Routable::message(MessageBody::Put(PutDocumentMessage {
            load_type: lt.clone(),
            document: Document::new(doc_id("id:music:song::t"), "song", &b"data"[..]),
            timestamp: 1,
        })),
        Routable::message(MessageBody::Remove(RemoveDocumentMessage {
            load_type: lt.clone(),
            id: doc_id("id:ns:type::123"),
        })),
        Routable::message(MessageBody::Update(UpdateDocumentMessage {
            load_type: lt,
            update: granary_document::DocumentUpdate::new(
                doc_id("id:music:song::u"),
                "song",
                Bytes::new(),
            ),
            old_timestamp: 0,
            new_timestamp: 1,
        })),
        Routable::message(MessageBody::Get(GetDocumentMessage {
            id: doc_id("id:ns:type::g"),
            field_set: "[all]".into(),
        })),
        Routable::message(MessageBody::GetBucketList(GetBucketListMessage {
            bucket: BucketId::new(5),
            bucket_space: BucketSpace::default(),
        })),
        Routable::message(MessageBody::VisitorInfo(VisitorInfoMessage {
            finished_buckets: vec![BucketId::new(1)],
            error_message: "e".into(),
        })),
    ]
}

#[test]
fn test_one_byte_truncation_fails_cleanly() {
    // Shortening any valid encoding by one byte must produce a decode
    // error -- not wrong data, not a panic, not a hang.
    let registry = harness::registry();
    for routable in sample_messages() {
        let bytes = harness::encode(&registry, &routable);
        assert!(!bytes.is_empty());
        let truncated = &bytes[..bytes.len() - 1];
        let result = harness::decode(&registry, routable.type_code(), truncated);
        assert!(
            result.is_err(),
            "{} decoded successfully from truncated input",
            routable.kind()
        );
    }
}

#[test]
fn test_update_shorter_than_minimum_fails() {
    // An update needs at least the feed header; four bytes is not enough
    // for anything.
    let registry = harness::registry();
    let result = harness::decode(&registry, MESSAGE_UPDATEDOCUMENT, &[0, 0]);
    assert!(result.is_err());
}

#[test]
fn test_empty_buffer_fails_for_every_message() {
    let registry = harness::registry();
    for code in MESSAGE_PUTDOCUMENT..=MESSAGE_QUERYRESULT {
        // Every message carries at least one field.
        assert!(
            harness::decode(&registry, code, &[]).is_err(),
            "message code {code} decoded from an empty buffer"
        );
    }
}

#[test]
fn test_unknown_type_code_is_lookup_miss_not_decode_error() {
    let registry = harness::registry();
    // Outside the declared variant set entirely.
    assert!(registry.lookup(424_242).is_none());
    // A registered code with a corrupt payload is the other taxonomy branch.
    assert!(harness::decode(&registry, MESSAGE_GETDOCUMENT, &[0xff]).is_err());
}

#[test]
fn test_encode_with_wrong_factory_is_type_mismatch() {
    let registry = harness::registry();
    let remove = Routable::message(MessageBody::Remove(RemoveDocumentMessage {
        load_type: harness::load_types().default_type().clone(),
        id: doc_id("id:ns:type::m"),
    }));

    // The put factory must refuse a remove message...
    let put_factory = registry.lookup(MESSAGE_PUTDOCUMENT).unwrap();
    let mut out = granary_document::GrowableBuffer::new();
    let err = put_factory.encode(&remove, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::TypeMismatch { .. }));

    // ...and a reply factory must refuse any message.
    let reply_factory = registry.lookup(REPLY_PUTDOCUMENT).unwrap();
    let err = reply_factory.encode(&remove, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::TypeMismatch { .. }));
    assert!(out.is_empty(), "failed encodes must not append");
}

#[test]
fn test_unknown_document_type_rejected_on_decode() {
    // Encode against a permissive catalog, decode against one that no
    // longer knows the type.
    let registry = harness::registry();
    let put = Routable::message(MessageBody::Put(PutDocumentMessage {
        load_type: harness::load_types().default_type().clone(),
        document: Document::new(doc_id("id:old:album::x"), "album", Bytes::new()),
        timestamp: 0,
    }));
    let bytes = harness::encode(&registry, &put);

    let empty_catalog = std::sync::Arc::new(granary_document::DocumentTypeCatalog::default());
    let bare_registry = Registry::new(empty_catalog);
    let err = harness::decode(&bare_registry, MESSAGE_PUTDOCUMENT, &bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnknownDocumentType(name) if name == "album"));
}

#[test]
fn test_garbage_bytes_terminate_quickly() {
    // A buffer of 0xff everywhere: every length prefix it implies is
    // negative, so decode must bail out early on every variant.
    let registry = harness::registry();
    let garbage = vec![0xffu8; 64];
    for code in registry.type_codes().collect::<Vec<_>>() {
        // Empty replies legitimately decode from any position without
        // reading; skip codes whose valid encoding is zero-length.
        let factory = registry.lookup(code).unwrap();
        let mut cur = granary_document::ByteCursor::new(&garbage);
        let _ = factory.decode(&mut cur, &harness::load_types());
        assert!(
            cur.position() <= garbage.len(),
            "cursor ran past the buffer for code {code}"
        );
    }
}
