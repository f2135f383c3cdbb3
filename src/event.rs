#![doc = r#"
The set of events a MIDI track can carry.

Every event decoded out of an `MTrk` chunk becomes one variant of
[`Event`]. Channel voice messages and the meta events the trace renders
with dedicated fields each get their own variant; everything else is
captured verbatim as [`Event::Other`] so that no byte of the track is
dropped on the floor.
"#]

/// A decoded track event.
///
/// Events are immutable once decoded. The delta-time that positions an
/// event within its track lives on [`TrackEvent`](crate::file::TrackEvent),
/// not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `0x9n`: a key was pressed.
    ///
    /// A velocity of zero is reported as-is, not coerced to a note-off.
    NoteOn {
        /// Channel 0-15, from the status low nibble.
        channel: u8,
        /// Note number 0-127.
        note: u8,
        /// Strike velocity 0-127.
        velocity: u8,
    },
    /// `0x8n`: a key was released.
    NoteOff {
        /// Channel 0-15.
        channel: u8,
        /// Note number 0-127.
        note: u8,
        /// Release velocity 0-127.
        velocity: u8,
    },
    /// `0xAn`: per-key pressure.
    PolyTouch {
        /// Channel 0-15.
        channel: u8,
        /// Note number 0-127.
        note: u8,
        /// Pressure value 0-127.
        value: u8,
    },
    /// `0xBn`: a controller moved.
    ControlChange {
        /// Channel 0-15.
        channel: u8,
        /// Controller number 0-127.
        controller: u8,
        /// Controller value 0-127.
        value: u8,
    },
    /// `0xCn`: the channel switched instruments.
    ProgramChange {
        /// Channel 0-15.
        channel: u8,
        /// Program number 0-127.
        program: u8,
    },
    /// `0xDn`: channel-wide pressure.
    Aftertouch {
        /// Channel 0-15.
        channel: u8,
        /// Pressure value 0-127.
        value: u8,
    },
    /// `0xEn`: pitch bend.
    PitchWheel {
        /// Channel 0-15.
        channel: u8,
        /// The 14-bit wheel position re-centered on zero, so -8192..=8191.
        pitch: i16,
    },
    /// Meta `0x51`: the tempo changed.
    SetTempo {
        /// Microseconds per quarter note.
        micros_per_beat: u32,
    },
    /// Meta `0x58`: the time signature changed.
    TimeSignature {
        /// Beats per bar.
        numerator: u8,
        /// Real denominator, already expanded from the stored power of two.
        denominator: u16,
        /// MIDI clocks per metronome click.
        clocks_per_click: u8,
        /// Notated 32nd notes per quarter note.
        notated_32nds_per_quarter: u8,
    },
    /// Meta `0x59`: the key signature changed.
    KeySignature {
        /// Sharps when positive, flats when negative. -7..=7.
        sharps: i8,
        /// True for a minor key.
        minor: bool,
    },
    /// Anything the decoder does not model: sysex, unrecognized meta
    /// events, stray system-common messages.
    Other(OtherEvent),
}

/// An event carried through as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherEvent {
    /// What kind of byte stream produced this event.
    pub kind: OtherKind,
    /// The payload, or data bytes, verbatim.
    pub data: Vec<u8>,
}

/// The source of an [`OtherEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherKind {
    /// A meta event (`0xFF`) with this meta-type byte.
    Meta(u8),
    /// A system exclusive message (`0xF0` or `0xF7`).
    SysEx,
    /// A system common or real-time status byte found in the track.
    System(u8),
}

impl Event {
    /// The channel the event addresses, for channel voice messages.
    pub const fn channel(&self) -> Option<u8> {
        use Event::*;
        match self {
            NoteOn { channel, .. }
            | NoteOff { channel, .. }
            | PolyTouch { channel, .. }
            | ControlChange { channel, .. }
            | ProgramChange { channel, .. }
            | Aftertouch { channel, .. }
            | PitchWheel { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// True for the meta events that exist only in files, not on the wire
    pub const fn is_meta(&self) -> bool {
        use Event::*;
        matches!(
            self,
            SetTempo { .. }
                | TimeSignature { .. }
                | KeySignature { .. }
                | Other(OtherEvent {
                    kind: OtherKind::Meta(_),
                    ..
                })
        )
    }
}

#[test]
fn channel_of_voice_messages() {
    let event = Event::NoteOn {
        channel: 9,
        note: 38,
        velocity: 100,
    };
    assert_eq!(event.channel(), Some(9));
    assert_eq!(
        Event::SetTempo {
            micros_per_beat: 500_000
        }
        .channel(),
        None
    );
}

#[test]
fn meta_events_know_they_are_meta() {
    assert!(
        Event::SetTempo {
            micros_per_beat: 500_000
        }
        .is_meta()
    );
    assert!(
        Event::Other(OtherEvent {
            kind: OtherKind::Meta(0x2F),
            data: vec![],
        })
        .is_meta()
    );
    assert!(
        !Event::Other(OtherEvent {
            kind: OtherKind::SysEx,
            data: vec![],
        })
        .is_meta()
    );
    assert!(
        !Event::NoteOff {
            channel: 0,
            note: 60,
            velocity: 0
        }
        .is_meta()
    );
}
