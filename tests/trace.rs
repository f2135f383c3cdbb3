mod common;

use common::smf;
use miditrace::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn minimal_note_pair_trace() {
    let track = [
        0x00, 0x90, 0x3C, 0x64, // NoteOn C4 velocity 100
        0x83, 0x60, 0x80, 0x3C, 0x00, // 480 ticks later, NoteOff C4
    ];
    let bytes = smf(0, 480, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();

    let expected = "\
=== MIDI File Information ===
Type: 0
Ticks per beat: 480
Number of tracks: 1
Length (seconds): 0.5000

=== Track 0 ===
Track name: Unnamed
Number of messages: 2

Time: 0 ticks (0.0000s) | NOTE_ON  | Note: 60 (C4) | Velocity: 100 | Channel: 0
Time: 480 ticks (0.5000s) | NOTE_OFF | Note: 60 (C4) | Velocity: 0 | Channel: 0

";
    assert_eq!(trace::render(&file), expected);
}

#[test]
fn tempo_change_splits_cumulative_seconds() {
    let track = [
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500,000
        0x81, 0x70, 0x90, 0x3C, 0x64, // 240 ticks at 500,000 -> 0.25 s
        0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40, // tempo 1,000,000
        0x81, 0x70, 0x80, 0x3C, 0x00, // 240 ticks at 1,000,000 -> +0.50 s
    ];
    let bytes = smf(0, 480, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();

    let expected = "\
=== MIDI File Information ===
Type: 0
Ticks per beat: 480
Number of tracks: 1
Length (seconds): 0.7500

=== Track 0 ===
Track name: Unnamed
Number of messages: 4

Time: 0 ticks (0.0000s) | SET_TEMPO | Tempo: 500000 microseconds/beat (120.00 BPM)
Time: 240 ticks (0.2500s) | NOTE_ON  | Note: 60 (C4) | Velocity: 100 | Channel: 0
Time: 240 ticks (0.2500s) | SET_TEMPO | Tempo: 1000000 microseconds/beat (60.00 BPM)
Time: 480 ticks (0.7500s) | NOTE_OFF | Note: 60 (C4) | Velocity: 0 | Channel: 0

";
    assert_eq!(trace::render(&file), expected);
}

#[test]
fn every_event_type_renders() {
    let track = [
        0x00, 0xFF, 0x03, 0x05, b'D', b'r', b'u', b'm', b's', // track name
        0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08, // 4/4
        0x00, 0xFF, 0x59, 0x02, 0x00, 0x00, // C major
        0x00, 0xC9, 0x26, // program 38, channel 9
        0x00, 0xB0, 0x07, 0x64, // volume controller
        0x60, 0xE0, 0x00, 0x50, // pitch wheel, one beat in
        0x00, 0xD0, 0x40, // channel pressure
        0x00, 0xA0, 0x3C, 0x20, // poly pressure on C4
        0x00, 0xFF, 0x2F, 0x00, // end of track
    ];
    let bytes = smf(0, 96, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();

    let expected = "\
=== MIDI File Information ===
Type: 0
Ticks per beat: 96
Number of tracks: 1
Length (seconds): 0.5000

=== Track 0 ===
Track name: Drums
Number of messages: 8

Time: 0 ticks (0.0000s) | TIME_SIGNATURE | 4/4 | Clocks per click: 24 | 32nds per quarter: 8
Time: 0 ticks (0.0000s) | KEY_SIGNATURE | Key: C
Time: 0 ticks (0.0000s) | PROGRAM_CHANGE | Program: 38 | Channel: 9
Time: 0 ticks (0.0000s) | CONTROL_CHANGE | Control: 7 | Value: 100 | Channel: 0
Time: 96 ticks (0.5000s) | PITCHWHEEL | Pitch: 2048 | Channel: 0
Time: 96 ticks (0.5000s) | AFTERTOUCH | Value: 64 | Channel: 0
Time: 96 ticks (0.5000s) | POLYTOUCH | Note: 60 (C4) | Value: 32 | Channel: 0
Time: 96 ticks (0.5000s) | END_OF_TRACK | Data: []

";
    assert_eq!(trace::render(&file), expected);
}

#[test]
fn sysex_and_unknown_meta_render_raw() {
    let track = [
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // sysex
        0x00, 0xFF, 0x60, 0x02, 0xAB, 0xCD, // meta type with no name
    ];
    let bytes = smf(0, 480, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();
    let text = trace::render(&file);

    assert!(text.contains("| SYSEX | Data: [0x43, 0x12, 0xF7]"));
    assert!(text.contains("| META_0X60 | Data: [0xAB, 0xCD]"));
}

#[test]
fn minor_key_signature_renders_named() {
    let track = [0x00, 0xFF, 0x59, 0x02, 0xFD, 0x01]; // three flats, minor
    let bytes = smf(0, 480, &[&track]);
    let file = MidiFile::parse(&bytes).unwrap();

    assert!(trace::render(&file).contains("| KEY_SIGNATURE | Key: Cm"));
}
