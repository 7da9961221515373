//! Bucket identifiers and bucket spaces.
//!
//! A bucket is a partition of the document corpus; a bucket space is a named
//! partitioning domain that bucket-oriented operations may reference. The
//! codec treats both as plain values.

use std::fmt;

/// Raw 64-bit bucket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(u64);

impl BucketId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketId(0x{:016x})", self.0)
    }
}

/// A named bucket-space token, carried on the wire in textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketSpace {
    name: String,
}

impl BucketSpace {
    /// The space ordinary documents live in.
    pub const DEFAULT: &'static str = "default";
    /// The space for globally replicated documents.
    pub const GLOBAL: &'static str = "global";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for BucketSpace {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for BucketSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
