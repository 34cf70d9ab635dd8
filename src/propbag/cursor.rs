//! Bounds-checked little-endian byte cursor.
//!
//! The cursor owns its buffer and keeps an index into it. Every read is
//! validated against the remaining length before the index moves, so a
//! failed read leaves the position untouched.

use byteorder::{ByteOrder, LittleEndian};

use super::types::error::{PropbagError, Result};

/// An owned byte buffer plus a monotonically advancing read position.
#[derive(Debug, Clone)]
pub struct Cursor {
    data: Vec<u8>,
    pos: usize,
}

impl Cursor {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes not yet consumed.
    pub fn remaining_length(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns the next `size` bytes without advancing.
    pub fn peek(&self, size: usize) -> Result<&[u8]> {
        self.check(size)?;
        Ok(&self.data[self.pos..self.pos + size])
    }

    /// Discards the next `size` bytes.
    pub fn advance(&mut self, size: usize) -> Result<()> {
        self.check(size)?;
        self.pos += size;
        Ok(())
    }

    /// Returns an owned copy of the next `size` bytes and advances past them.
    pub fn take(&mut self, size: usize) -> Result<Vec<u8>> {
        let bytes = self.peek(size)?.to_vec();
        self.pos += size;
        Ok(bytes)
    }

    pub fn take_u8(&mut self) -> Result<u8> {
        let value = self.peek(1)?[0];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a little-endian two's-complement 32-bit integer.
    pub fn take_i32(&mut self) -> Result<i32> {
        let value = LittleEndian::read_i32(self.peek(4)?);
        self.pos += 4;
        Ok(value)
    }

    /// Reads 4 bytes as a signed integer and reinterprets the bits as unsigned.
    pub fn take_u32(&mut self) -> Result<u32> {
        Ok((i64::from(self.take_i32()?) & 0xFFFF_FFFF) as u32)
    }

    pub fn take_f32(&mut self) -> Result<f32> {
        let value = LittleEndian::read_f32(self.peek(4)?);
        self.pos += 4;
        Ok(value)
    }

    pub fn take_u64(&mut self) -> Result<u64> {
        let value = LittleEndian::read_u64(self.peek(8)?);
        self.pos += 8;
        Ok(value)
    }

    fn check(&self, size: usize) -> Result<()> {
        let remaining = self.remaining_length();
        if size > remaining {
            return Err(PropbagError::OutOfBounds {
                offset: self.pos,
                requested: size,
                remaining,
            });
        }
        Ok(())
    }
}
