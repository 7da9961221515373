//! Document identifiers.
//!
//! Textual form: `id:<namespace>:<doc-type>::<user-specific>`.
//! The user-specific part is free-form and may be empty; namespace and
//! doc-type may not. The id is stored in its textual form and sliced on
//! access, so Display round-trips byte-for-byte.

use std::fmt;

use crate::DocumentError;

const SCHEME: &str = "id:";

/// A validated document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    text: String,
    // Byte offsets into `text`: namespace = SCHEME.len()..ns_end,
    // doc type = ns_end + 1..type_end, user = type_end + 2..
    ns_end: usize,
    type_end: usize,
}

impl DocumentId {
    /// Parse a textual document id.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let fail = |reason| DocumentError::InvalidDocumentId {
            text: text.to_string(),
            reason,
        };

        let rest = text
            .strip_prefix(SCHEME)
            .ok_or_else(|| fail("missing 'id:' scheme"))?;
        let ns_len = rest
            .find(':')
            .ok_or_else(|| fail("missing namespace separator"))?;
        if ns_len == 0 {
            return Err(fail("empty namespace"));
        }
        let ns_end = SCHEME.len() + ns_len;

        let after_ns = &text[ns_end + 1..];
        let type_len = after_ns
            .find(':')
            .ok_or_else(|| fail("missing doc-type separator"))?;
        if type_len == 0 {
            return Err(fail("empty doc-type"));
        }
        let type_end = ns_end + 1 + type_len;

        // The doc-type must be followed by the "::" user separator.
        if !text[type_end..].starts_with("::") {
            return Err(fail("missing '::' user separator"));
        }

        Ok(Self {
            text: text.to_string(),
            ns_end,
            type_end,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.text[SCHEME.len()..self.ns_end]
    }

    pub fn doc_type(&self) -> &str {
        &self.text[self.ns_end + 1..self.type_end]
    }

    /// The free-form user-specific part (may be empty).
    pub fn user(&self) -> &str {
        &self.text[self.type_end + 2..]
    }

    /// The full textual form, as written on the wire.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
