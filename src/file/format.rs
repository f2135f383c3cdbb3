use core::fmt;
use num_enum::TryFromPrimitive;

#[doc = r#"
The three Standard MIDI File formats, from the header's format word.

The format decides how tracks relate to one another:

- Format 0 holds a single multi-channel track.
- Format 1 holds simultaneous tracks of one song.
- Format 2 holds sequentially independent patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track carrying every channel.
    SingleMultiChannel = 0,
    /// Format 1: tracks play together.
    Simultaneous = 1,
    /// Format 2: tracks are independent sequences.
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// The header's format word for this format.
    pub const fn number(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number().fmt(f)
    }
}

#[test]
fn format_from_header_word() {
    assert_eq!(FormatType::try_from(0u16), Ok(FormatType::SingleMultiChannel));
    assert_eq!(FormatType::try_from(1u16), Ok(FormatType::Simultaneous));
    assert_eq!(
        FormatType::try_from(2u16),
        Ok(FormatType::SequentiallyIndependent)
    );
    assert!(FormatType::try_from(3u16).is_err());
}

#[test]
fn format_displays_as_number() {
    assert_eq!(FormatType::Simultaneous.to_string(), "1");
}
