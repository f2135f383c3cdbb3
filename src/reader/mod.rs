#![doc = r#"
A cursor over raw MIDI bytes.

[`Reader`] owns a position into a borrowed byte slice and exposes the
primitive reads every layer above it is built from: fixed-width big-endian
integers for chunk headers, exact slices for chunk payloads, and the
variable-length quantities that carry delta-times and payload lengths.

All reads advance the cursor only on success, so a failed read leaves the
position pointing at the field that could not be completed.
"#]

mod error;
pub use error::*;

/// A byte cursor over the contents of a MIDI file or track.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a borrowed byte slice, positioned at the start.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the current position of the cursor.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left to read.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// True if any bytes are left to read
    pub const fn has_remaining(&self) -> bool {
        self.position < self.bytes.len()
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> DecodeResult<u8> {
        self.bytes
            .get(self.position)
            .copied()
            .ok_or_else(|| self.oob(1))
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact()?))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact()?))
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read `len` bytes as a borrowed slice of the underlying buffer.
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.oob(len - self.remaining()));
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Skip `len` bytes without inspecting them.
    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a MIDI variable-length quantity.
    ///
    /// Big-endian base-128: each byte contributes its low seven bits, and a
    /// set high bit marks continuation. Quantities are capped at four bytes
    /// (28 bits of value).
    pub fn read_varlen(&mut self) -> DecodeResult<u32> {
        let mut value = 0u32;
        for consumed in 0..4 {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(_) if consumed > 0 => {
                    return Err(DecodeError::new(
                        self.position,
                        TruncatedInputError::UnterminatedVarLen,
                    ));
                }
                Err(e) => return Err(e),
            };
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::new(
            self.position,
            TruncatedInputError::VarLenTooLong,
        ))
    }

    fn oob(&self, needed: usize) -> DecodeError {
        DecodeError::new(self.position, TruncatedInputError::OutOfBounds { needed })
    }
}

#[cfg(test)]
fn encode_varlen(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out
}

#[test]
fn varlen_round_trip() {
    for value in [
        0u32, 1, 0x40, 0x7F, 0x80, 0x2000, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x0FFF_FFFF,
    ] {
        let encoded = encode_varlen(value);
        let mut reader = Reader::from_byte_slice(&encoded);
        assert_eq!(reader.read_varlen().unwrap(), value);
        assert_eq!(reader.buffer_position(), encoded.len());
    }
}

#[test]
fn varlen_known_encodings() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x00]);
    assert_eq!(reader.read_varlen().unwrap(), 128);

    let mut reader = Reader::from_byte_slice(&[0xFF, 0xFF, 0xFF, 0x7F]);
    assert_eq!(reader.read_varlen().unwrap(), 0x0FFF_FFFF);
}

#[test]
fn varlen_unterminated_is_truncated() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x82]);
    let err = reader.read_varlen().unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn varlen_empty_is_truncated() {
    let mut reader = Reader::from_byte_slice(&[]);
    assert!(reader.read_varlen().unwrap_err().is_truncated());
}

#[test]
fn varlen_five_bytes_rejected() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x81, 0x81, 0x81, 0x00]);
    let err = reader.read_varlen().unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::TruncatedInput(TruncatedInputError::VarLenTooLong)
    ));
}

#[test]
fn fixed_width_reads() {
    let mut reader = Reader::from_byte_slice(&[0x4D, 0x54, 0x68, 0x64, 0x00, 0x06]);
    assert_eq!(reader.read_u32().unwrap(), 0x4D546864);
    assert_eq!(reader.read_u16().unwrap(), 6);
    assert!(!reader.has_remaining());
}

#[test]
fn short_read_reports_offset() {
    let mut reader = Reader::from_byte_slice(&[0x00]);
    let err = reader.read_u32().unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.offset(), 0);
}

#[test]
fn peek_does_not_consume() {
    let mut reader = Reader::from_byte_slice(&[0x90, 0x3C]);
    assert_eq!(reader.peek_u8().unwrap(), 0x90);
    assert_eq!(reader.read_u8().unwrap(), 0x90);
    assert_eq!(reader.buffer_position(), 1);
}
