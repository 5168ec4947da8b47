//! Bounds-checked sequential reader over a message byte region.

use bytes::Bytes;

use crate::codec::{self, SwapBytes};
use crate::error::{DecodeError, DecodeResult};

/// Sequential big-endian reader with absolute seek.
///
/// Every read checks the remaining length first and fails with
/// [`DecodeError::TruncatedInput`] instead of reading past the buffer.
#[derive(Debug, Clone)]
pub struct Cursor {
    data: Bytes,
    pos: usize,
}

impl Cursor {
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Unread portion of the buffer, without advancing.
    pub fn rest(&self) -> Bytes {
        self.data.slice(self.pos.min(self.data.len())..)
    }

    fn ensure(&self, needed: usize) -> DecodeResult<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(DecodeError::truncated(needed, remaining));
        }
        Ok(())
    }

    fn take<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Moves to an absolute offset. Seeking to the end of the buffer is allowed.
    pub fn seek(&mut self, offset: usize) -> DecodeResult<()> {
        if offset > self.data.len() {
            return Err(DecodeError::truncated(
                offset - self.pos.min(offset),
                self.remaining(),
            ));
        }
        self.pos = offset;
        Ok(())
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn peek_u16(&self) -> Option<u16> {
        let bytes = self.data.get(self.pos..self.pos + 2)?;
        Some(codec::swap_u16(u16::from_ne_bytes([bytes[0], bytes[1]])))
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(self.take::<1>()?[0] as i8)
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(codec::swap_u16(u16::from_ne_bytes(self.take()?)))
    }

    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        Ok(codec::swap_i16(i16::from_ne_bytes(self.take()?)))
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(codec::swap_u32(u32::from_ne_bytes(self.take()?)))
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(codec::swap_i32(i32::from_ne_bytes(self.take()?)))
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(codec::swap_f32(f32::from_ne_bytes(self.take()?)))
    }

    /// Zero-copy slice of the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<Bytes> {
        self.ensure(n)?;
        let out = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// Reads `n` single-byte characters, dropping trailing NULs.
    pub fn read_string(&mut self, n: usize) -> DecodeResult<String> {
        let raw = self.read_bytes(n)?;
        let text: String = raw.iter().map(|&b| b as char).collect();
        Ok(text.trim_end_matches('\0').to_string())
    }

    /// Reads a 4-byte flag word. `'T'` is true and `'F'` is false; any
    /// other nonzero leading byte is treated as true.
    pub fn read_bool_word(&mut self) -> DecodeResult<bool> {
        let word = self.take::<4>()?;
        Ok(match word[0] {
            b'T' => true,
            b'F' | 0 => false,
            _ => true,
        })
    }

    /// Reads a 4-byte word and keeps its first character.
    pub fn read_char_word(&mut self) -> DecodeResult<char> {
        let word = self.take::<4>()?;
        Ok(word[0] as char)
    }

    fn read_array<T, const N: usize>(
        &mut self,
        count: usize,
        from_ne: fn([u8; N]) -> T,
    ) -> DecodeResult<Vec<T>>
    where
        T: SwapBytes,
    {
        self.ensure(count * N)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(from_ne(self.take()?));
        }
        codec::swap_slice(&mut values);
        Ok(values)
    }

    pub fn read_u16_array(&mut self, count: usize) -> DecodeResult<Vec<u16>> {
        self.read_array(count, u16::from_ne_bytes)
    }

    pub fn read_u32_array(&mut self, count: usize) -> DecodeResult<Vec<u32>> {
        self.read_array(count, u32::from_ne_bytes)
    }

    pub fn read_f32_array(&mut self, count: usize) -> DecodeResult<Vec<f32>> {
        self.read_array(count, f32::from_ne_bytes)
    }
}
