#![doc = r#"
Renders a decoded [`MidiFile`] as a textual event trace.

The output is a faithful linear trace: a file information block, then
one block per track with one line per event in decode order. Nothing is
reordered, filtered or aggregated. Each line carries the event's
cumulative tick position and cumulative wall-clock seconds, computed by
walking the track's deltas through a per-track [`TempoMap`].
"#]

use core::fmt::{self, Write};

use crate::{
    event::{Event, OtherEvent, OtherKind},
    file::{MidiFile, Track},
    note::NoteName,
    timing::TempoMap,
};

/// Render the whole file as a trace string.
pub fn render(file: &MidiFile) -> String {
    let mut out = String::new();
    // fmt::Write on a String is infallible.
    let _ = write_trace(&mut out, file);
    out
}

/// Write the trace for `file` into any [`fmt::Write`] sink.
pub fn write_trace<W: Write>(out: &mut W, file: &MidiFile) -> fmt::Result {
    writeln!(out, "=== MIDI File Information ===")?;
    writeln!(out, "Type: {}", file.format())?;
    writeln!(out, "Ticks per beat: {}", file.ticks_per_beat())?;
    writeln!(out, "Number of tracks: {}", file.tracks().len())?;
    writeln!(out, "Length (seconds): {:.4}", file.length_seconds())?;
    writeln!(out)?;

    for (index, track) in file.tracks().iter().enumerate() {
        write_track(out, index, track, file.ticks_per_beat())?;
    }
    Ok(())
}

fn write_track<W: Write>(
    out: &mut W,
    index: usize,
    track: &Track,
    ticks_per_beat: u16,
) -> fmt::Result {
    writeln!(out, "=== Track {index} ===")?;
    writeln!(out, "Track name: {}", track.name().unwrap_or("Unnamed"))?;
    writeln!(out, "Number of messages: {}", track.events().len())?;
    writeln!(out)?;

    let mut tempo = TempoMap::new(ticks_per_beat);
    for timed in track.events() {
        tempo.advance(timed.delta_ticks());
        write!(
            out,
            "Time: {} ticks ({:.4}s) | ",
            tempo.ticks(),
            tempo.seconds()
        )?;
        write_event(out, timed.event())?;
        writeln!(out)?;

        // The tempo event itself sits at the old tempo's clock; only
        // later deltas run at the new rate.
        if let Event::SetTempo { micros_per_beat } = timed.event() {
            tempo.observe_tempo(*micros_per_beat);
        }
    }
    writeln!(out)
}

fn write_event<W: Write>(out: &mut W, event: &Event) -> fmt::Result {
    use Event::*;
    match event {
        NoteOn {
            channel,
            note,
            velocity,
        } => write!(
            out,
            "NOTE_ON  | Note: {note} ({}) | Velocity: {velocity} | Channel: {channel}",
            NoteName::new(*note)
        ),
        NoteOff {
            channel,
            note,
            velocity,
        } => write!(
            out,
            "NOTE_OFF | Note: {note} ({}) | Velocity: {velocity} | Channel: {channel}",
            NoteName::new(*note)
        ),
        PolyTouch {
            channel,
            note,
            value,
        } => write!(
            out,
            "POLYTOUCH | Note: {note} ({}) | Value: {value} | Channel: {channel}",
            NoteName::new(*note)
        ),
        ControlChange {
            channel,
            controller,
            value,
        } => write!(
            out,
            "CONTROL_CHANGE | Control: {controller} | Value: {value} | Channel: {channel}"
        ),
        ProgramChange { channel, program } => write!(
            out,
            "PROGRAM_CHANGE | Program: {program} | Channel: {channel}"
        ),
        Aftertouch { channel, value } => {
            write!(out, "AFTERTOUCH | Value: {value} | Channel: {channel}")
        }
        PitchWheel { channel, pitch } => {
            write!(out, "PITCHWHEEL | Pitch: {pitch} | Channel: {channel}")
        }
        SetTempo { micros_per_beat } => write!(
            out,
            "SET_TEMPO | Tempo: {micros_per_beat} microseconds/beat ({:.2} BPM)",
            TempoMap::bpm(*micros_per_beat)
        ),
        TimeSignature {
            numerator,
            denominator,
            clocks_per_click,
            notated_32nds_per_quarter,
        } => write!(
            out,
            "TIME_SIGNATURE | {numerator}/{denominator} | Clocks per click: {clocks_per_click} | 32nds per quarter: {notated_32nds_per_quarter}"
        ),
        KeySignature { sharps, minor } => {
            write!(out, "KEY_SIGNATURE | Key: {}", key_name(*sharps, *minor))
        }
        Other(other) => write_other(out, other),
    }
}

fn write_other<W: Write>(out: &mut W, other: &OtherEvent) -> fmt::Result {
    match other.kind {
        OtherKind::Meta(meta_type) => match meta_name(meta_type) {
            Some(name) => write!(out, "{name}")?,
            None => write!(out, "META_0X{meta_type:02X}")?,
        },
        OtherKind::SysEx => write!(out, "SYSEX")?,
        OtherKind::System(status) => write!(out, "SYSTEM_0X{status:02X}")?,
    }
    write!(out, " | Data: [")?;
    for (i, byte) in other.data.iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "0x{byte:02X}")?;
    }
    write!(out, "]")
}

/// Display names for the meta events carried through as raw payloads.
const fn meta_name(meta_type: u8) -> Option<&'static str> {
    Some(match meta_type {
        0x00 => "SEQUENCE_NUMBER",
        0x01 => "TEXT",
        0x02 => "COPYRIGHT",
        0x04 => "INSTRUMENT_NAME",
        0x05 => "LYRICS",
        0x06 => "MARKER",
        0x07 => "CUE_POINT",
        0x20 => "CHANNEL_PREFIX",
        0x21 => "MIDI_PORT",
        0x2F => "END_OF_TRACK",
        0x54 => "SMPTE_OFFSET",
        0x7F => "SEQUENCER_SPECIFIC",
        _ => return None,
    })
}

/// Key signature display name, sharps count indexed on the circle of
/// fifths. The decoder guarantees `sharps` lies in -7..=7.
fn key_name(sharps: i8, minor: bool) -> &'static str {
    const MAJOR: [&str; 15] = [
        "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
    ];
    const MINOR: [&str; 15] = [
        "Abm", "Ebm", "Bbm", "Fm", "Cm", "Gm", "Dm", "Am", "Em", "Bm", "F#m", "C#m", "G#m", "D#m",
        "A#m",
    ];
    let index = (sharps + 7) as usize;
    if minor { MINOR[index] } else { MAJOR[index] }
}

#[test]
fn key_names_follow_the_circle_of_fifths() {
    assert_eq!(key_name(0, false), "C");
    assert_eq!(key_name(0, true), "Am");
    assert_eq!(key_name(2, false), "D");
    assert_eq!(key_name(-3, false), "Eb");
    assert_eq!(key_name(-3, true), "Cm");
    assert_eq!(key_name(7, false), "C#");
    assert_eq!(key_name(-7, true), "Abm");
}

#[test]
fn other_event_line() {
    let mut out = String::new();
    write_other(
        &mut out,
        &OtherEvent {
            kind: OtherKind::Meta(0x2F),
            data: vec![],
        },
    )
    .unwrap();
    assert_eq!(out, "END_OF_TRACK | Data: []");

    let mut out = String::new();
    write_other(
        &mut out,
        &OtherEvent {
            kind: OtherKind::SysEx,
            data: vec![0x43, 0x12],
        },
    )
    .unwrap();
    assert_eq!(out, "SYSEX | Data: [0x43, 0x12]");
}

#[test]
fn tempo_line_shows_bpm() {
    let mut out = String::new();
    write_event(
        &mut out,
        &Event::SetTempo {
            micros_per_beat: 500_000,
        },
    )
    .unwrap();
    assert_eq!(
        out,
        "SET_TEMPO | Tempo: 500000 microseconds/beat (120.00 BPM)"
    );
}
