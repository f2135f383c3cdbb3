use super::Reader;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a MIDI file
"#]
#[derive(Debug, Error)]
#[error("decoding at offset {offset}, {kind}")]
pub struct DecodeError {
    offset: usize,
    pub(crate) kind: DecodeErrorKind,
}

/// A kind of error that the decoder can produce
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    /// The buffer ran out mid-field.
    #[error("{0}")]
    TruncatedInput(#[from] TruncatedInputError),
    /// The header chunk is not a well-formed `MThd`.
    #[error("{0}")]
    InvalidHeader(#[from] InvalidHeaderError),
    /// A track-level chunk is not a well-formed `MTrk`.
    #[error("{0}")]
    InvalidChunk(#[from] InvalidChunkError),
    /// A track event declares data that cannot be decoded.
    #[error("{0}")]
    MalformedEvent(#[from] MalformedEventError),
}

impl DecodeError {
    /// Create a decode error from an offset and kind
    pub fn new(offset: usize, kind: impl Into<DecodeErrorKind>) -> Self {
        Self {
            offset,
            kind: kind.into(),
        }
    }

    /// Returns the error kind of the decoder.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns the byte offset where the decode error occurred.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True if the input ended before the field being read did
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::TruncatedInput(_))
    }
}

/// The buffer was exhausted in the middle of a field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TruncatedInputError {
    /// A fixed-width read ran past the end of the buffer.
    #[error("needed {needed} more byte(s) past end of input")]
    OutOfBounds {
        /// How many bytes the read was short by.
        needed: usize,
    },
    /// Every remaining byte had its continuation bit set.
    #[error("input ended inside a variable-length quantity")]
    UnterminatedVarLen,
    /// More than four bytes carried a continuation bit.
    ///
    /// Variable-length quantities are capped at 28 bits.
    #[error("variable-length quantity exceeds four bytes")]
    VarLenTooLong,
}

/// The `MThd` chunk was missing or inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidHeaderError {
    /// The file does not begin with `MThd`.
    #[error("expected chunk tag MThd, found {found:?}")]
    BadTag {
        /// The four bytes found in place of the tag.
        found: [u8; 4],
    },
    /// The header declared a length other than 6.
    #[error("header declares length {declared}, must be 6")]
    BadLength {
        /// The declared length.
        declared: u32,
    },
    /// The format word is not 0, 1 or 2.
    #[error("format {0} is not a known SMF format")]
    UnknownFormat(u16),
    /// A format 0 file must contain exactly one track.
    #[error("format 0 declares {0} tracks, expected 1")]
    SingleTrackFormat(u16),
    /// The division word uses SMPTE timing, which has no
    /// ticks-per-beat interpretation.
    #[error("SMPTE time division is not supported")]
    SmpteTiming,
    /// The division word declared zero ticks per beat.
    #[error("time division of zero ticks per beat")]
    ZeroDivision,
}

/// A chunk where a track was expected could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidChunkError {
    /// A second `MThd` appeared in the chunk stream.
    #[error("duplicate MThd chunk")]
    DuplicateHeader,
    /// A chunk declared more bytes than the buffer holds.
    #[error("chunk length {declared} overruns the {remaining} byte(s) remaining")]
    LengthOverrun {
        /// The declared chunk length.
        declared: u32,
        /// Bytes left in the buffer after the length field.
        remaining: usize,
    },
}

/// A track event could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedEventError {
    /// A data byte appeared with no status byte to run under.
    #[error("data byte {byte:#04x} with no running status")]
    OrphanRunningStatus {
        /// The offending byte.
        byte: u8,
    },
    /// A meta or sysex payload declared more bytes than the track holds.
    #[error("event payload of {declared} byte(s) overruns the track")]
    PayloadOverrun {
        /// The declared payload length.
        declared: u32,
    },
    /// A known meta event declared the wrong payload length.
    #[error("meta event {meta_type:#04x} declares length {declared}")]
    MetaLength {
        /// The meta-type byte.
        meta_type: u8,
        /// The declared payload length.
        declared: u32,
    },
    /// A time signature denominator exponent that cannot be represented.
    #[error("time signature denominator exponent {0} out of range")]
    DenominatorOutOfRange(u8),
    /// A key signature outside the circle of fifths.
    #[error("key signature of {0} sharps out of range")]
    KeySignatureOutOfRange(i8),
}

/// The Decode Result type (see [`DecodeError`])
pub type DecodeResult<T> = Result<T, DecodeError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<DecodeErrorKind>) -> DecodeError {
    DecodeError::new(reader.buffer_position(), v.into())
}
