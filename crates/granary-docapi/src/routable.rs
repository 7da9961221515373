//! The routable abstraction: a message or a reply, tagged by type code.
//!
//! Type codes are stable protocol constants. Messages occupy 1001-1018,
//! replies mirror them at +1000, and WrongDistributionReply sits alone at
//! 2099 since it has no corresponding message. The code travels in the
//! transport's outer envelope, never in the payload.

use crate::messages::{DocumentMessage, MessageBody};
use crate::replies::{DocumentReply, ReplyBody};

pub const MESSAGE_PUTDOCUMENT: u32 = 1001;
pub const MESSAGE_REMOVEDOCUMENT: u32 = 1002;
pub const MESSAGE_UPDATEDOCUMENT: u32 = 1003;
pub const MESSAGE_GETDOCUMENT: u32 = 1004;
pub const MESSAGE_CREATEVISITOR: u32 = 1005;
pub const MESSAGE_DESTROYVISITOR: u32 = 1006;
pub const MESSAGE_MAPVISITOR: u32 = 1007;
pub const MESSAGE_VISITORINFO: u32 = 1008;
pub const MESSAGE_GETBUCKETLIST: u32 = 1009;
pub const MESSAGE_GETBUCKETSTATE: u32 = 1010;
pub const MESSAGE_STATBUCKET: u32 = 1011;
pub const MESSAGE_STATDOCUMENT: u32 = 1012;
pub const MESSAGE_EMPTYBUCKETS: u32 = 1013;
pub const MESSAGE_DOCUMENTLIST: u32 = 1014;
pub const MESSAGE_DOCUMENTSUMMARY: u32 = 1015;
pub const MESSAGE_REMOVELOCATION: u32 = 1016;
pub const MESSAGE_SEARCHRESULT: u32 = 1017;
pub const MESSAGE_QUERYRESULT: u32 = 1018;

pub const REPLY_PUTDOCUMENT: u32 = 2001;
pub const REPLY_REMOVEDOCUMENT: u32 = 2002;
pub const REPLY_UPDATEDOCUMENT: u32 = 2003;
pub const REPLY_GETDOCUMENT: u32 = 2004;
pub const REPLY_CREATEVISITOR: u32 = 2005;
pub const REPLY_DESTROYVISITOR: u32 = 2006;
pub const REPLY_MAPVISITOR: u32 = 2007;
pub const REPLY_VISITORINFO: u32 = 2008;
pub const REPLY_GETBUCKETLIST: u32 = 2009;
pub const REPLY_GETBUCKETSTATE: u32 = 2010;
pub const REPLY_STATBUCKET: u32 = 2011;
pub const REPLY_STATDOCUMENT: u32 = 2012;
pub const REPLY_EMPTYBUCKETS: u32 = 2013;
pub const REPLY_DOCUMENTLIST: u32 = 2014;
pub const REPLY_DOCUMENTSUMMARY: u32 = 2015;
pub const REPLY_REMOVELOCATION: u32 = 2016;
pub const REPLY_SEARCHRESULT: u32 = 2017;
pub const REPLY_QUERYRESULT: u32 = 2018;
pub const REPLY_WRONGDISTRIBUTION: u32 = 2099;

/// A message or reply exchanged over the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Routable {
    Message(DocumentMessage),
    Reply(DocumentReply),
}

impl Routable {
    pub fn message(body: MessageBody) -> Self {
        Routable::Message(DocumentMessage::new(body))
    }

    pub fn reply(body: ReplyBody) -> Self {
        Routable::Reply(DocumentReply::new(body))
    }

    /// The stable numeric type code for this routable's variant.
    pub fn type_code(&self) -> u32 {
        match self {
            Routable::Message(m) => match &m.body {
                MessageBody::Put(_) => MESSAGE_PUTDOCUMENT,
                MessageBody::Remove(_) => MESSAGE_REMOVEDOCUMENT,
                MessageBody::Update(_) => MESSAGE_UPDATEDOCUMENT,
                MessageBody::Get(_) => MESSAGE_GETDOCUMENT,
                MessageBody::CreateVisitor(_) => MESSAGE_CREATEVISITOR,
                MessageBody::DestroyVisitor(_) => MESSAGE_DESTROYVISITOR,
                MessageBody::MapVisitor(_) => MESSAGE_MAPVISITOR,
                MessageBody::VisitorInfo(_) => MESSAGE_VISITORINFO,
                MessageBody::GetBucketList(_) => MESSAGE_GETBUCKETLIST,
                MessageBody::GetBucketState(_) => MESSAGE_GETBUCKETSTATE,
                MessageBody::StatBucket(_) => MESSAGE_STATBUCKET,
                MessageBody::StatDocument(_) => MESSAGE_STATDOCUMENT,
                MessageBody::EmptyBuckets(_) => MESSAGE_EMPTYBUCKETS,
                MessageBody::DocumentList(_) => MESSAGE_DOCUMENTLIST,
                MessageBody::DocumentSummary(_) => MESSAGE_DOCUMENTSUMMARY,
                MessageBody::RemoveLocation(_) => MESSAGE_REMOVELOCATION,
                MessageBody::SearchResult(_) => MESSAGE_SEARCHRESULT,
                MessageBody::QueryResult(_) => MESSAGE_QUERYRESULT,
            },
            Routable::Reply(r) => match &r.body {
                ReplyBody::Put(_) => REPLY_PUTDOCUMENT,
                ReplyBody::Remove(_) => REPLY_REMOVEDOCUMENT,
                ReplyBody::Update(_) => REPLY_UPDATEDOCUMENT,
                ReplyBody::Get(_) => REPLY_GETDOCUMENT,
                ReplyBody::CreateVisitor(_) => REPLY_CREATEVISITOR,
                ReplyBody::DestroyVisitor(_) => REPLY_DESTROYVISITOR,
                ReplyBody::MapVisitor(_) => REPLY_MAPVISITOR,
                ReplyBody::VisitorInfo(_) => REPLY_VISITORINFO,
                ReplyBody::GetBucketList(_) => REPLY_GETBUCKETLIST,
                ReplyBody::GetBucketState(_) => REPLY_GETBUCKETSTATE,
                ReplyBody::StatBucket(_) => REPLY_STATBUCKET,
                ReplyBody::StatDocument(_) => REPLY_STATDOCUMENT,
                ReplyBody::EmptyBuckets(_) => REPLY_EMPTYBUCKETS,
                ReplyBody::DocumentList(_) => REPLY_DOCUMENTLIST,
                ReplyBody::DocumentSummary(_) => REPLY_DOCUMENTSUMMARY,
                ReplyBody::RemoveLocation(_) => REPLY_REMOVELOCATION,
                ReplyBody::SearchResult(_) => REPLY_SEARCHRESULT,
                ReplyBody::QueryResult(_) => REPLY_QUERYRESULT,
                ReplyBody::WrongDistribution(_) => REPLY_WRONGDISTRIBUTION,
            },
        }
    }

    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Routable::Message(m) => m.body.kind(),
            Routable::Reply(r) => r.body.kind(),
        }
    }
}
