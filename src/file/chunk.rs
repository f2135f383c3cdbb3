#![doc = r#"
Chunk-level parsing of a MIDI file.

MIDI files are organized into chunks, each identified by a 4-character
ASCII tag followed by a 32-bit big-endian length and then the chunk data.
The Standard MIDI File specification defines two chunk types: the `MThd`
header chunk, which must come first and always declares a length of 6,
and `MTrk` track chunks holding the event streams.

Real-world files sometimes carry proprietary chunks between tracks. Any
chunk with an unrecognized tag is skipped over by its declared length; a
second `MThd` is the one tag that is never acceptable where a track is
expected.
"#]

use crate::{
    file::FormatType,
    reader::{DecodeResult, InvalidChunkError, InvalidHeaderError, Reader, inv_data},
};

const HEADER_TAG: [u8; 4] = *b"MThd";
const TRACK_TAG: [u8; 4] = *b"MTrk";

/// The decoded fields of an `MThd` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawHeader {
    pub format: FormatType,
    pub num_tracks: u16,
    pub ticks_per_beat: u16,
}

/// Read the header chunk at the reader's position.
pub(crate) fn read_header(reader: &mut Reader<'_>) -> DecodeResult<RawHeader> {
    let tag: [u8; 4] = reader.read_exact()?;
    if tag != HEADER_TAG {
        return Err(inv_data(reader, InvalidHeaderError::BadTag { found: tag }));
    }
    let declared = reader.read_u32()?;
    if declared != 6 {
        return Err(inv_data(reader, InvalidHeaderError::BadLength { declared }));
    }

    let format_word = reader.read_u16()?;
    let format = FormatType::try_from(format_word)
        .map_err(|_| inv_data(reader, InvalidHeaderError::UnknownFormat(format_word)))?;
    let num_tracks = reader.read_u16()?;
    let division = reader.read_u16()?;

    if format == FormatType::SingleMultiChannel && num_tracks != 1 {
        return Err(inv_data(
            reader,
            InvalidHeaderError::SingleTrackFormat(num_tracks),
        ));
    }
    // High bit set means SMPTE frame timing, which the tick math cannot use.
    if division & 0x8000 != 0 {
        return Err(inv_data(reader, InvalidHeaderError::SmpteTiming));
    }
    let ticks_per_beat = division & 0x7FFF;
    if ticks_per_beat == 0 {
        return Err(inv_data(reader, InvalidHeaderError::ZeroDivision));
    }

    Ok(RawHeader {
        format,
        num_tracks,
        ticks_per_beat,
    })
}

/// Read chunks until the next `MTrk`, returning its payload as a
/// borrowed slice. Unknown chunks on the way are skipped.
pub(crate) fn read_track_chunk<'a>(reader: &mut Reader<'a>) -> DecodeResult<&'a [u8]> {
    loop {
        let tag: [u8; 4] = reader.read_exact()?;
        if tag == HEADER_TAG {
            return Err(inv_data(reader, InvalidChunkError::DuplicateHeader));
        }
        let declared = reader.read_u32()?;
        if declared as usize > reader.remaining() {
            return Err(inv_data(
                reader,
                InvalidChunkError::LengthOverrun {
                    declared,
                    remaining: reader.remaining(),
                },
            ));
        }
        if tag == TRACK_TAG {
            return reader.read_bytes(declared as usize);
        }
        reader.skip(declared as usize)?;
    }
}

#[cfg(test)]
use crate::reader::{DecodeErrorKind, TruncatedInputError};

#[test]
fn reads_a_minimal_header() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x01, 0xE0,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = read_header(&mut reader).unwrap();
    assert_eq!(header.format, FormatType::Simultaneous);
    assert_eq!(header.num_tracks, 2);
    assert_eq!(header.ticks_per_beat, 480);
}

#[test]
fn rejects_wrong_tag() {
    let bytes = [
        0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_header(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::BadTag { found: [b'R', ..] })
    ));
}

#[test]
fn rejects_wrong_declared_length() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, 0x00,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_header(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::BadLength { declared: 7 })
    ));
}

#[test]
fn rejects_smpte_division() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0xE7, 0x28,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_header(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::SmpteTiming)
    ));
}

#[test]
fn rejects_zero_ticks_per_beat() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_header(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::ZeroDivision)
    ));
}

#[test]
fn truncated_header_is_truncated_input() {
    let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_header(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::TruncatedInput(TruncatedInputError::OutOfBounds { .. })
    ));
}

#[test]
fn skips_unknown_chunks_before_a_track() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"XFIH");
    bytes.extend_from_slice(&4u32.to_be_bytes());
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x00]);

    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(read_track_chunk(&mut reader).unwrap(), &[0x00, 0x00]);
}

#[test]
fn overrunning_chunk_length_is_invalid() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&100u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00; 4]);

    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_track_chunk(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidChunk(InvalidChunkError::LengthOverrun {
            declared: 100,
            remaining: 4
        })
    ));
}

#[test]
fn second_header_is_invalid_where_track_expected() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00; 6]);

    let mut reader = Reader::from_byte_slice(&bytes);
    let err = read_track_chunk(&mut reader).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidChunk(InvalidChunkError::DuplicateHeader)
    ));
}
