//! Byte buffer traits used by the payload codec.
//!
//! This module provides:
//! - [`ReadBuffer`] for offset-based little-endian reads
//! - [`WriteBuffer`] for append-only little-endian writes
//!
//! Reads index directly into the slice; callers bound-check with
//! [`ReadBuffer::ensure`] before reading so that malformed input surfaces as
//! [`Error::BufferTooShort`] instead of a panic.

use crate::error::{Error, Result};

/// Trait for read-only buffer access with little-endian primitive reads.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    fn len(&self) -> usize;

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that `len` bytes are readable starting at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if the range runs past the end.
    #[inline]
    fn ensure(&self, offset: usize, len: usize) -> Result<()> {
        let required = offset.saturating_add(len);
        if required > self.len() {
            return Err(Error::BufferTooShort {
                required,
                available: self.len(),
            });
        }
        Ok(())
    }

    /// Reads a u8 at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u8(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Reads a u32 in little-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u32_le(&self, offset: usize) -> u32 {
        let bytes = &self.as_slice()[offset..offset + 4];
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Reads an i32 in little-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_i32_le(&self, offset: usize) -> i32 {
        self.get_u32_le(offset) as i32
    }

    /// Reads a u64 in little-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_u64_le(&self, offset: usize) -> u64 {
        let bytes = &self.as_slice()[offset..offset + 8];
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        u64::from_le_bytes(raw)
    }

    /// Reads an i64 in little-endian at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to read from
    #[inline(always)]
    fn get_i64_le(&self, offset: usize) -> i64 {
        self.get_u64_le(offset) as i64
    }

    /// Reads an f32 in little-endian at the given offset.
    #[inline(always)]
    fn get_f32_le(&self, offset: usize) -> f32 {
        f32::from_bits(self.get_u32_le(offset))
    }

    /// Reads an f64 in little-endian at the given offset.
    #[inline(always)]
    fn get_f64_le(&self, offset: usize) -> f64 {
        f64::from_bits(self.get_u64_le(offset))
    }

    /// Returns a slice of bytes at the given offset and length.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to start from
    /// * `len` - Number of bytes to read
    #[inline(always)]
    fn get_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.as_slice()[offset..offset + len]
    }
}

/// Trait for append-only buffers with little-endian primitive writes.
pub trait WriteBuffer {
    /// Appends raw bytes to the end of the buffer.
    fn put_bytes(&mut self, src: &[u8]);

    /// Returns the number of bytes written so far.
    fn position(&self) -> usize;

    /// Appends a u8.
    #[inline(always)]
    fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    /// Appends a u32 in little-endian.
    #[inline(always)]
    fn put_u32_le(&mut self, value: u32) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Appends an i32 in little-endian.
    #[inline(always)]
    fn put_i32_le(&mut self, value: i32) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Appends a u64 in little-endian.
    #[inline(always)]
    fn put_u64_le(&mut self, value: u64) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Appends an i64 in little-endian.
    #[inline(always)]
    fn put_i64_le(&mut self, value: i64) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Appends an f32 in little-endian.
    #[inline(always)]
    fn put_f32_le(&mut self, value: f32) {
        self.put_u32_le(value.to_bits());
    }

    /// Appends an f64 in little-endian.
    #[inline(always)]
    fn put_f64_le(&mut self, value: f64) {
        self.put_u64_le(value.to_bits());
    }
}

impl ReadBuffer for [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
}

impl ReadBuffer for Vec<u8> {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl WriteBuffer for Vec<u8> {
    #[inline(always)]
    fn put_bytes(&mut self, src: &[u8]) {
        self.extend_from_slice(src);
    }

    #[inline(always)]
    fn position(&self) -> usize {
        Vec::len(self)
    }
}
