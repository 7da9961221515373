//! Byte-buffer abstractions for the wire codec.
//!
//! `ByteCursor` is a read-only view plus a monotonically advancing position;
//! it never mutates the bytes underneath. `GrowableBuffer` is an append-only
//! write target over `BytesMut`. All multi-byte integers are big-endian.
//!
//! Every read is bounds-checked up front: a short buffer yields
//! `BufferError::Truncated`, never a panic and never a read past the end.

use bytes::{BufMut, Bytes, BytesMut};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("truncated buffer: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
}

/// Read-only cursor over a byte slice.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read position, in bytes from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BufferError> {
        if self.remaining() < n {
            return Err(BufferError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i32(&mut self) -> Result<i32, BufferError> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i64(&mut self) -> Result<i64, BufferError> {
        let b = self.take(8)?;
        Ok(i64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_u32(&mut self) -> Result<u32, BufferError> {
        Ok(self.read_i32()? as u32)
    }

    pub fn read_u64(&mut self) -> Result<u64, BufferError> {
        Ok(self.read_i64()? as u64)
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BufferError> {
        self.take(n)
    }
}

/// Append-only write buffer.
#[derive(Debug, Default)]
pub struct GrowableBuffer {
    inner: BytesMut,
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn put_u8(&mut self, v: u8) {
        self.inner.put_u8(v);
    }

    pub fn put_i32(&mut self, v: i32) {
        self.inner.put_i32(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.inner.put_u32(v);
    }

    pub fn put_i64(&mut self, v: i64) {
        self.inner.put_i64(v);
    }

    pub fn put_u64(&mut self, v: u64) {
        self.inner.put_u64(v);
    }

    pub fn put_slice(&mut self, v: &[u8]) {
        self.inner.put_slice(v);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Hand the accumulated bytes to the transport.
    pub fn freeze(self) -> Bytes {
        self.inner.freeze()
    }
}
