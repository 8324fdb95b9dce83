//! Big-endian byte cursor for writing
//!
//! Output is buffered in memory so callers can hand the finished bytes to
//! [`write_atomic`](super::write_atomic) only once the whole file encoded.

use byteorder::{BigEndian, WriteBytesExt};

use super::STRING_PADDING;

#[derive(Debug, Default)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Current absolute offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    // Writes into a Vec cannot fail, so the io::Result is discarded.

    pub fn write_u16(&mut self, value: u16) {
        let _ = self.buffer.write_u16::<BigEndian>(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        let _ = self.buffer.write_u32::<BigEndian>(value);
    }

    /// Write an IEEE-754 float as its big-endian bit pattern.
    pub fn write_f32(&mut self, value: f32) {
        let _ = self.buffer.write_f32::<BigEndian>(value);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, count: usize) {
        self.buffer.resize(self.buffer.len() + count, 0);
    }

    /// Write a length-prefixed string followed by `@` padding to 4 bytes.
    pub fn write_ascii(&mut self, text: &str) {
        self.write_u32(text.len() as u32);
        self.buffer.extend_from_slice(text.as_bytes());
        while self.buffer.len() % 4 != 0 {
            self.buffer.push(STRING_PADDING);
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
