use crate::EncodeError;

/// Cursor writing into a caller-owned buffer.
///
/// A failed write leaves the position untouched. Only the bytes returned by
/// [`as_written`](Self::as_written) after a successful encode form a frame.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Claims the next `n` octets, or fails without moving.
    fn reserve(&mut self, n: usize) -> Result<&mut [u8], EncodeError> {
        let start = self.pos;
        let end = start
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(EncodeError::BufferTooSmall)?;
        self.pos = end;
        Ok(&mut self.buf[start..end])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }
}
