//! Integration test entry point for the docapi codec.
//!
//! Drives encode/decode through the registry exactly the way the transport
//! does: lookup by type code, then delegate to the factory.

mod harness;
mod malformed;
mod messages;
mod replies;
