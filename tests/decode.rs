mod common;

use common::smf;
use miditrace::prelude::*;

#[test]
fn parses_a_single_track_file() {
    let track = [0x00, 0x90, 0x3C, 0x64, 0x83, 0x60, 0x80, 0x3C, 0x00];
    let bytes = smf(0, 480, &[&track]);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.format(), FormatType::SingleMultiChannel);
    assert_eq!(file.ticks_per_beat(), 480);
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(file.tracks()[0].events().len(), 2);
    assert!((file.length_seconds() - 0.5).abs() < 1e-9);

    let note_on = file.tracks()[0].events()[0].event();
    assert_eq!(note_on.channel(), Some(0));
    assert!(!note_on.is_meta());
}

#[test]
fn parses_a_multi_track_file_with_names() {
    let lead = [
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', // track name
        0x00, 0x90, 0x45, 0x64,
    ];
    let bass = [0x00, 0x91, 0x28, 0x50];
    let bytes = smf(1, 96, &[&lead, &bass]);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.format(), FormatType::Simultaneous);
    assert_eq!(file.tracks()[0].name(), Some("Lead"));
    assert_eq!(file.tracks()[1].name(), None);
}

#[test]
fn skips_unknown_chunks_between_tracks() {
    let track = [0x00, 0x90, 0x3C, 0x64];
    let mut bytes = smf(1, 480, &[&track]);
    // Splice a proprietary chunk in front of the MTrk.
    let mut spliced = bytes[..14].to_vec();
    spliced.extend_from_slice(b"PROP");
    spliced.extend_from_slice(&3u32.to_be_bytes());
    spliced.extend_from_slice(&[1, 2, 3]);
    spliced.extend_from_slice(&bytes[14..]);
    bytes = spliced;

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks().len(), 1);
    assert_eq!(file.tracks()[0].events().len(), 1);
}

#[test]
fn header_declaring_wrong_length_is_invalid() {
    let mut bytes = smf(0, 480, &[&[0x00, 0x90, 0x3C, 0x64]]);
    bytes[7] = 7;
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::BadLength { declared: 7 })
    ));
}

#[test]
fn format_zero_with_two_tracks_is_invalid() {
    let track: &[u8] = &[0x00, 0x90, 0x3C, 0x64];
    let bytes = smf(0, 480, &[track, track]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::SingleTrackFormat(2))
    ));
}

#[test]
fn unknown_format_word_is_invalid() {
    let bytes = smf(3, 480, &[&[0x00, 0x90, 0x3C, 0x64]]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::InvalidHeader(InvalidHeaderError::UnknownFormat(3))
    ));
}

#[test]
fn missing_declared_track_is_truncated() {
    let mut bytes = smf(1, 480, &[&[0x00, 0x90, 0x3C, 0x64]]);
    // Bump the declared track count past what the file holds.
    bytes[11] = 2;
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn truncated_delta_time_is_truncated() {
    // Both delta bytes carry the continuation bit; the track ends there.
    let bytes = smf(0, 480, &[&[0x81, 0x82]]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::TruncatedInput(TruncatedInputError::UnterminatedVarLen)
    ));
}

#[test]
fn tempo_state_does_not_cross_tracks() {
    // Track 0 switches to a one-second beat; track 1 must still run at
    // the 0.5 s default for its own deltas.
    let slow = [
        0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40, // tempo 1,000,000
        0x83, 0x60, 0x90, 0x3C, 0x64, // 480 ticks -> 1.0 s
    ];
    let plain = [0x83, 0x60, 0x90, 0x45, 0x64]; // 480 ticks -> 0.5 s
    let bytes = smf(1, 480, &[&slow, &plain]);

    let file = MidiFile::parse(&bytes).unwrap();
    assert!((file.length_seconds() - 1.0).abs() < 1e-9);

    let tempo_event = file.tracks()[0].events()[0].event();
    assert!(tempo_event.is_meta());
    assert_eq!(tempo_event.channel(), None);

    let text = trace::render(&file);
    assert!(text.contains("Time: 480 ticks (1.0000s) | NOTE_ON  | Note: 60"));
    assert!(text.contains("Time: 480 ticks (0.5000s) | NOTE_ON  | Note: 69"));
}

#[test]
fn failure_in_one_file_leaves_others_decodable() {
    // Decoding is per-buffer with no shared state: a malformed file
    // erroring must not disturb a later decode of a good one.
    let good = smf(0, 480, &[&[0x00, 0x90, 0x3C, 0x64]]);
    let bad = smf(0, 480, &[&[0x00, 0x3C, 0x64]]);

    assert!(MidiFile::parse(&bad).is_err());
    assert!(MidiFile::parse(&good).is_ok());
}
