//! Primitive wire-value codec.
//!
//! Fixed, self-describing encodings shared by every variant codec:
//! string = i32 length + UTF-8 bytes, boolean = one byte (0 or 1), integers
//! fixed-width big-endian, document id and bucket space = length-prefixed
//! textual form, blob = i32 length + raw bytes.
//!
//! The decode side for string, boolean, i32, i64 and document id is carried
//! by the [`legacy`] module: those layouts are unchanged from the previous
//! protocol generation, so the current generation reuses that code instead of
//! reimplementing it. This is a code-sharing seam, not a version-negotiation
//! mechanism.

use granary_document::{BucketSpace, ByteCursor, DocumentId, GrowableBuffer};

use crate::{CodecError, CodecResult};

pub fn put_string(out: &mut GrowableBuffer, s: &str) {
    out.put_i32(s.len() as i32);
    out.put_slice(s.as_bytes());
}

pub fn put_bool(out: &mut GrowableBuffer, v: bool) {
    out.put_u8(v as u8);
}

pub fn put_bytes(out: &mut GrowableBuffer, v: &[u8]) {
    out.put_i32(v.len() as i32);
    out.put_slice(v);
}

pub fn put_document_id(out: &mut GrowableBuffer, id: &DocumentId) {
    put_string(out, id.as_str());
}

pub fn put_bucket_space(out: &mut GrowableBuffer, space: &BucketSpace) {
    put_string(out, space.name());
}

// Unchanged-layout decoders live in `legacy`; re-export them as the current
// generation's decode path.
pub use legacy::{decode_bool, decode_document_id, decode_int, decode_long, decode_string};

/// Decode a length-prefixed blob.
pub fn decode_bytes(buf: &mut ByteCursor<'_>) -> CodecResult<bytes::Bytes> {
    let len = legacy::decode_len(buf)?;
    Ok(bytes::Bytes::copy_from_slice(buf.read_bytes(len)?))
}

/// Decode an i32 element-count prefix. `min_elem_size` is the smallest
/// possible wire size of one element; a count that could not possibly fit in
/// the remaining bytes is rejected up front, so a corrupt count can neither
/// over-allocate nor drive a long bogus loop.
pub(crate) fn decode_count(buf: &mut ByteCursor<'_>, min_elem_size: usize) -> CodecResult<usize> {
    let count = buf.read_i32()?;
    if count < 0 || (count as usize).saturating_mul(min_elem_size) > buf.remaining() {
        return Err(CodecError::InvalidLength(count));
    }
    Ok(count as usize)
}

/// Decode a bucket-space token (introduced in this generation).
pub fn decode_bucket_space(buf: &mut ByteCursor<'_>) -> CodecResult<BucketSpace> {
    Ok(BucketSpace::new(decode_string(buf)?))
}

/// Decoders for primitives whose byte layout is unchanged from the prior
/// protocol generation. Variant codecs call these through the re-exports
/// above; nothing here may change without breaking backward readability.
pub mod legacy {
    use super::*;

    /// Decode and validate an i32 length prefix. The length is checked
    /// against the bytes actually remaining before anything is allocated,
    /// so a corrupt prefix cannot trigger an oversized allocation.
    pub(crate) fn decode_len(buf: &mut ByteCursor<'_>) -> CodecResult<usize> {
        let len = buf.read_i32()?;
        if len < 0 || len as usize > buf.remaining() {
            return Err(CodecError::InvalidLength(len));
        }
        Ok(len as usize)
    }

    pub fn decode_string(buf: &mut ByteCursor<'_>) -> CodecResult<String> {
        let len = decode_len(buf)?;
        let bytes = buf.read_bytes(len)?;
        Ok(std::str::from_utf8(bytes)?.to_string())
    }

    pub fn decode_bool(buf: &mut ByteCursor<'_>) -> CodecResult<bool> {
        match buf.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    pub fn decode_int(buf: &mut ByteCursor<'_>) -> CodecResult<i32> {
        Ok(buf.read_i32()?)
    }

    pub fn decode_long(buf: &mut ByteCursor<'_>) -> CodecResult<i64> {
        Ok(buf.read_i64()?)
    }

    pub fn decode_document_id(buf: &mut ByteCursor<'_>) -> CodecResult<DocumentId> {
        let text = decode_string(buf)?;
        Ok(DocumentId::parse(&text)?)
    }
}
