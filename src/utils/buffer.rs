use crate::protocol::constants::LENGTH_PREFIX_SIZE;
use crate::protocol::error::FormatError;

/// Growable output buffer for length-prefixed fields
#[derive(Debug, Default)]
pub struct ByteBuffer {
    buf: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a u32 little-endian length followed by `bytes`.
    ///
    /// No upper bound is applied here; callers keep lengths within `u32`.
    pub fn write_length_prefixed(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= u32::MAX as usize);
        let len = bytes.len() as u32;
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(bytes);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Forward-only cursor over an untrusted input buffer
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let bytes = self.take(1)?;
        Ok(bytes[0])
    }

    /// Read a u32 little-endian length `n`, then exactly `n` bytes.
    ///
    /// The declared length is checked against what is left before slicing,
    /// so a corrupt prefix never reads out of bounds or allocates.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], FormatError> {
        let prefix = self.take(LENGTH_PREFIX_SIZE)?;
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        self.take(len)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let available = self.remaining();
        if n > available {
            return Err(FormatError::Truncated {
                needed: n,
                available,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_is_little_endian() {
        let mut out = ByteBuffer::new();
        out.write_length_prefixed(b"abc");
        assert_eq!(out.as_slice(), &[3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn reads_back_consecutive_fields() {
        let mut out = ByteBuffer::with_capacity(32);
        out.write_u8(7);
        out.write_length_prefixed(b"");
        out.write_length_prefixed(&[0x00, 0xFF]);
        let bytes = out.into_vec();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_length_prefixed().unwrap(), b"");
        assert_eq!(reader.read_length_prefixed().unwrap(), &[0x00u8, 0xFF]);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn short_prefix_is_truncated() {
        let mut reader = ByteReader::new(&[1, 0]);
        assert_eq!(
            reader.read_length_prefixed(),
            Err(FormatError::Truncated {
                needed: 4,
                available: 2,
            })
        );
    }

    #[test]
    fn short_body_is_truncated() {
        let mut reader = ByteReader::new(&[5, 0, 0, 0, b'a', b'b']);
        assert_eq!(
            reader.read_length_prefixed(),
            Err(FormatError::Truncated {
                needed: 5,
                available: 2,
            })
        );
    }

    #[test]
    fn huge_declared_length_is_rejected() {
        let mut reader = ByteReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3]);
        assert_eq!(
            reader.read_length_prefixed(),
            Err(FormatError::Truncated {
                needed: u32::MAX as usize,
                available: 3,
            })
        );
    }

    #[test]
    fn empty_input_has_no_count_byte() {
        let mut reader = ByteReader::new(&[]);
        assert_eq!(
            reader.read_u8(),
            Err(FormatError::Truncated {
                needed: 1,
                available: 0,
            })
        );
    }
}
