//! Bounds-checked reading of fixed-width tile ids.

use crate::error::DecodeError;
use crate::limits::BYTES_PER_TILE;

/// Reader over a decoded layer buffer.
///
/// Every read is bounds checked; running past the end is a
/// [`DecodeError::DataTooShort`], never a panic or a silent truncation.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.data.len());
        let Some(end) = end else {
            return Err(DecodeError::DataTooShort {
                needed: self.pos.saturating_add(n),
                actual: self.data.len(),
            });
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Reads a little-endian u32. Byte 0 is the least significant.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(BYTES_PER_TILE)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads `count` consecutive little-endian u32 values.
    ///
    /// Fails before allocating when fewer than `4 * count` bytes remain.
    pub fn read_u32_vec(&mut self, count: usize) -> Result<Vec<u32>, DecodeError> {
        let needed = count.saturating_mul(BYTES_PER_TILE);
        if needed > self.remaining_len() {
            return Err(DecodeError::DataTooShort {
                needed: self.pos.saturating_add(needed),
                actual: self.data.len(),
            });
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_u32_le()?);
        }
        Ok(values)
    }
}
