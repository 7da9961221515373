//! The routable registry: type code -> factory, built once at startup.
//!
//! Immutable after construction and read concurrently with no locking. The
//! transport resolves the envelope's type code here and delegates to the
//! factory; a lookup miss is the distinguishable "no factory" outcome,
//! separate from any decode error, so callers can tell a protocol/version
//! mismatch apart from payload corruption.

use std::collections::HashMap;
use std::sync::Arc;

use granary_document::DocumentTypeCatalog;

use crate::factory::{MessageCodec, MessageFactory, ReplyCodec, ReplyFactory, RoutableFactory};
use crate::message_codecs::*;
use crate::reply_codecs::*;
use crate::routable::*;

pub struct Registry {
    factories: HashMap<u32, Box<dyn RoutableFactory>>,
}

impl Registry {
    /// Build the complete factory set. The catalog reference is shared by
    /// every factory that embeds documents or schema-typed fields.
    pub fn new(catalog: Arc<DocumentTypeCatalog>) -> Self {
        let mut factories = HashMap::new();

        fn message<C: MessageCodec + 'static>(
            map: &mut HashMap<u32, Box<dyn RoutableFactory>>,
            code: u32,
            codec: C,
        ) {
            let factory: Box<dyn RoutableFactory> = Box::new(MessageFactory::new(codec));
            let prev = map.insert(code, factory);
            debug_assert!(prev.is_none(), "duplicate factory for type code {code}");
        }

        fn reply<C: ReplyCodec + 'static>(
            map: &mut HashMap<u32, Box<dyn RoutableFactory>>,
            code: u32,
            codec: C,
        ) {
            let factory: Box<dyn RoutableFactory> = Box::new(ReplyFactory::new(codec));
            let prev = map.insert(code, factory);
            debug_assert!(prev.is_none(), "duplicate factory for type code {code}");
        }

        message(
            &mut factories,
            MESSAGE_PUTDOCUMENT,
            PutDocumentCodec::new(catalog.clone()),
        );
        message(&mut factories, MESSAGE_REMOVEDOCUMENT, RemoveDocumentCodec);
        message(
            &mut factories,
            MESSAGE_UPDATEDOCUMENT,
            UpdateDocumentCodec::new(catalog.clone()),
        );
        message(&mut factories, MESSAGE_GETDOCUMENT, GetDocumentCodec);
        message(
            &mut factories,
            MESSAGE_CREATEVISITOR,
            CreateVisitorCodec::new(catalog.clone()),
        );
        message(&mut factories, MESSAGE_DESTROYVISITOR, DestroyVisitorCodec);
        message(&mut factories, MESSAGE_MAPVISITOR, MapVisitorCodec);
        message(&mut factories, MESSAGE_VISITORINFO, VisitorInfoCodec);
        message(&mut factories, MESSAGE_GETBUCKETLIST, GetBucketListCodec);
        message(&mut factories, MESSAGE_GETBUCKETSTATE, GetBucketStateCodec);
        message(&mut factories, MESSAGE_STATBUCKET, StatBucketCodec);
        message(&mut factories, MESSAGE_STATDOCUMENT, StatDocumentCodec);
        message(&mut factories, MESSAGE_EMPTYBUCKETS, EmptyBucketsCodec);
        message(
            &mut factories,
            MESSAGE_DOCUMENTLIST,
            DocumentListCodec::new(catalog.clone()),
        );
        message(&mut factories, MESSAGE_DOCUMENTSUMMARY, DocumentSummaryCodec);
        message(&mut factories, MESSAGE_REMOVELOCATION, RemoveLocationCodec);
        message(&mut factories, MESSAGE_SEARCHRESULT, SearchResultCodec);
        message(&mut factories, MESSAGE_QUERYRESULT, QueryResultCodec);

        reply(&mut factories, REPLY_PUTDOCUMENT, PutDocumentReplyCodec);
        reply(&mut factories, REPLY_REMOVEDOCUMENT, RemoveDocumentReplyCodec);
        reply(&mut factories, REPLY_UPDATEDOCUMENT, UpdateDocumentReplyCodec);
        reply(
            &mut factories,
            REPLY_GETDOCUMENT,
            GetDocumentReplyCodec::new(catalog),
        );
        reply(&mut factories, REPLY_CREATEVISITOR, CreateVisitorReplyCodec);
        reply(&mut factories, REPLY_DESTROYVISITOR, DestroyVisitorReplyCodec);
        reply(&mut factories, REPLY_MAPVISITOR, MapVisitorReplyCodec);
        reply(&mut factories, REPLY_VISITORINFO, VisitorInfoReplyCodec);
        reply(&mut factories, REPLY_GETBUCKETLIST, GetBucketListReplyCodec);
        reply(&mut factories, REPLY_GETBUCKETSTATE, GetBucketStateReplyCodec);
        reply(&mut factories, REPLY_STATBUCKET, StatBucketReplyCodec);
        reply(&mut factories, REPLY_STATDOCUMENT, StatDocumentReplyCodec);
        reply(&mut factories, REPLY_EMPTYBUCKETS, EmptyBucketsReplyCodec);
        reply(&mut factories, REPLY_DOCUMENTLIST, DocumentListReplyCodec);
        reply(&mut factories, REPLY_DOCUMENTSUMMARY, DocumentSummaryReplyCodec);
        reply(&mut factories, REPLY_REMOVELOCATION, RemoveLocationReplyCodec);
        reply(&mut factories, REPLY_SEARCHRESULT, SearchResultReplyCodec);
        reply(&mut factories, REPLY_QUERYRESULT, QueryResultReplyCodec);
        reply(
            &mut factories,
            REPLY_WRONGDISTRIBUTION,
            WrongDistributionReplyCodec,
        );

        tracing::debug!(factories = factories.len(), "docapi registry built");
        Self { factories }
    }

    /// Resolve the factory for a type code. `None` means no factory is
    /// registered for the code -- a protocol or version mismatch, not a
    /// payload error.
    pub fn lookup(&self, type_code: u32) -> Option<&dyn RoutableFactory> {
        match self.factories.get(&type_code) {
            Some(factory) => Some(factory.as_ref()),
            None => {
                tracing::trace!(type_code, "no factory registered for type code");
                None
            }
        }
    }

    /// Every registered type code, for completeness checks.
    pub fn type_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
