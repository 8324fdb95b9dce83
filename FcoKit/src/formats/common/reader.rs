//! Big-endian byte cursor for reading
//!
//! Wraps a [`Cursor`] over a borrowed buffer. Every read that runs past the
//! end of the data reports [`Error::UnexpectedEof`].
//!
//! [`Error::UnexpectedEof`]: crate::Error::UnexpectedEof

use std::io::{Cursor, ErrorKind, Read};

use byteorder::{BigEndian, ReadBytesExt};

use super::STRING_PADDING;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

fn eof(err: std::io::Error) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(err)
    }
}

impl<'a> BinaryReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current absolute offset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Bytes left after the current offset.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    /// Jump to an absolute offset.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        if offset > self.cursor.get_ref().len() as u64 {
            return Err(Error::UnexpectedEof);
        }
        self.cursor.set_position(offset);
        Ok(())
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        self.cursor.set_position(self.cursor.position() + count as u64);
        Ok(())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.cursor.read_u16::<BigEndian>().map_err(eof)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor.read_u32::<BigEndian>().map_err(eof)
    }

    /// Read an IEEE-754 float from its big-endian bit pattern.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.cursor.read_f32::<BigEndian>().map_err(eof)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.cursor.read_exact(&mut buf).map_err(eof)?;
        Ok(buf)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        if count > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        let mut buf = vec![0u8; count];
        self.cursor.read_exact(&mut buf).map_err(eof)?;
        Ok(buf)
    }

    /// Read a length-prefixed string and consume the `@` padding after it.
    pub fn read_ascii(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        let bytes = self.read_bytes(length)?;

        // Stored as a C string, anything after a NUL is dropped
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = String::from_utf8_lossy(&bytes[..end]).into_owned();

        while self.position() % 4 != 0 {
            let padding = self.cursor.read_u8().map_err(eof)?;
            if padding != STRING_PADDING {
                tracing::warn!(
                    "Unexpected padding byte 0x{:02X} after \"{}\" at offset 0x{:X}",
                    padding,
                    text,
                    self.position() - 1
                );
            }
        }

        Ok(text)
    }
}
