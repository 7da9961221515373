//! Shared fixtures: a registry over a small music schema, a load-type set,
//! and encode/decode helpers that go through the registry like the transport
//! would.

use std::sync::Arc;

use bytes::Bytes;
use granary_docapi::{CodecResult, Registry, Routable};
use granary_document::{
    ByteCursor, DocumentId, DocumentTypeCatalog, GrowableBuffer, LoadType, LoadTypeSet,
};

pub fn catalog() -> Arc<DocumentTypeCatalog> {
    Arc::new(
        DocumentTypeCatalog::from_json(
            r#"{
                "document_types": [
                    {"name": "song", "fields": [{"name": "title", "data_type": "string"}]},
                    {"name": "album"},
                    {"name": "type"}
                ]
            }"#,
        )
        .expect("fixture catalog"),
    )
}

pub fn registry() -> Registry {
    Registry::new(catalog())
}

pub fn load_types() -> LoadTypeSet {
    LoadTypeSet::new(vec![LoadType::new(2, "batch")])
}

pub fn doc_id(text: &str) -> DocumentId {
    DocumentId::parse(text).expect("fixture document id")
}

/// Encode through the registry, panicking on fixture mistakes.
pub fn encode(registry: &Registry, routable: &Routable) -> Bytes {
    let factory = registry
        .lookup(routable.type_code())
        .expect("factory registered for fixture routable");
    let mut out = GrowableBuffer::new();
    factory.encode(routable, &mut out).expect("encode fixture");
    out.freeze()
}

/// Decode through the registry.
pub fn decode(registry: &Registry, type_code: u32, bytes: &[u8]) -> CodecResult<Routable> {
    let factory = registry
        .lookup(type_code)
        .expect("factory registered for type code");
    let mut cur = ByteCursor::new(bytes);
    factory.decode(&mut cur, &load_types())
}

/// Encode, decode, and check the shared contracts: full consumption, exact
/// approx-size accounting on messages, and input non-mutation. Returns the
/// decoded routable for variant-specific assertions.
pub fn roundtrip(registry: &Registry, routable: &Routable) -> Routable {
    let bytes = encode(registry, routable);
    let copy = bytes.to_vec();

    let factory = registry.lookup(routable.type_code()).unwrap();
    let mut cur = ByteCursor::new(&bytes);
    let decoded = factory
        .decode(&mut cur, &load_types())
        .unwrap_or_else(|e| panic!("decode of {} failed: {e}", routable.kind()));

    assert_eq!(
        cur.remaining(),
        0,
        "{} decode left bytes unread",
        routable.kind()
    );
    assert_eq!(&bytes[..], &copy[..], "decode mutated the input buffer");

    if let Routable::Message(msg) = &decoded {
        assert_eq!(
            msg.approx_size_bytes as usize,
            bytes.len(),
            "{} approx size must equal bytes consumed",
            routable.kind()
        );
    }

    match (routable, &decoded) {
        (Routable::Message(sent), Routable::Message(got)) => {
            assert_eq!(sent.body, got.body, "message body round trip");
        }
        (Routable::Reply(sent), Routable::Reply(got)) => {
            assert_eq!(sent.body, got.body, "reply body round trip");
        }
        _ => panic!("routable changed kind across the wire"),
    }

    decoded
}
