use core::fmt;

#[doc = r#"
Identifies one of the twelve tones, sharps notation.

Combined with an octave this names a MIDI note number:
note 60 is `C4`, note 69 is `A4`, note 0 is `C-1`.
"#]
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Identify the key from a note number.
    pub const fn from_note(note: u8) -> Self {
        use Key::*;
        match note % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            11 => B,
            _ => unreachable!(),
        }
    }

    /// Returns true if the key is a sharp
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        match self {
            C => write!(f, "C"),
            CSharp => write!(f, "C#"),
            D => write!(f, "D"),
            DSharp => write!(f, "D#"),
            E => write!(f, "E"),
            F => write!(f, "F"),
            FSharp => write!(f, "F#"),
            G => write!(f, "G"),
            GSharp => write!(f, "G#"),
            A => write!(f, "A"),
            ASharp => write!(f, "A#"),
            B => write!(f, "B"),
        }
    }
}

#[doc = r#"
Displays a MIDI note number as a note name.

A pure, formatting-time lookup. The octave is the floor of `note / 12`
minus one, so the full 0-127 range spans `C-1` through `G9`.

# Example
```rust
# use miditrace::prelude::*;
assert_eq!(NoteName::new(60).to_string(), "C4");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct NoteName(u8);

impl NoteName {
    /// Name the given note number.
    pub const fn new(note: u8) -> Self {
        Self(note)
    }

    /// The tone within the octave.
    pub const fn key(&self) -> Key {
        Key::from_note(self.0)
    }

    /// The octave, from -1 for notes 0-11 up to 9.
    pub const fn octave(&self) -> i8 {
        (self.0 / 12) as i8 - 1
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

#[test]
fn middle_c() {
    assert_eq!(NoteName::new(60).to_string(), "C4");
}

#[test]
fn concert_a() {
    assert_eq!(NoteName::new(69).to_string(), "A4");
}

#[test]
fn lowest_note() {
    assert_eq!(NoteName::new(0).to_string(), "C-1");
}

#[test]
fn highest_note() {
    assert_eq!(NoteName::new(127).to_string(), "G9");
}

#[test]
fn sharps() {
    assert_eq!(NoteName::new(61).to_string(), "C#4");
    assert!(NoteName::new(61).key().is_sharp());
    assert!(!NoteName::new(62).key().is_sharp());
}
