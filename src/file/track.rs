use crate::{
    event::{Event, OtherEvent, OtherKind},
    reader::{DecodeResult, MalformedEventError, Reader, inv_data},
};

#[doc = r#"
A decoded track: an optional name and its events in file order.

Tracks are produced by [`MidiFile::parse`](crate::file::MidiFile::parse)
and owned exclusively by the file that decoded them.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    name: Option<String>,
    events: Vec<TrackEvent>,
}

/// One event positioned within its track by a delta-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    delta_ticks: u32,
    event: Event,
}

impl TrackEvent {
    /// Pair an event with the ticks elapsed since the previous event.
    pub const fn new(delta_ticks: u32, event: Event) -> Self {
        Self { delta_ticks, event }
    }

    /// Ticks since the previous event in the same track.
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The decoded event.
    pub const fn event(&self) -> &Event {
        &self.event
    }
}

impl Track {
    /// The track's name, taken from its first track-name meta event.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The events of the track, in decode order.
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Decode one `MTrk` payload into an ordered event list.
    ///
    /// Walks the byte view to exhaustion: a delta-time, then one event,
    /// resolving running status by peeking the byte after the delta and
    /// consuming it only when its high bit marks a fresh status.
    pub(crate) fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut events = Vec::new();
        let mut name = None;
        let mut running: Option<u8> = None;
        // Delta of an absorbed track-name event, carried into the next
        // event so cumulative time stays intact.
        let mut pending_delta = 0u32;

        while reader.has_remaining() {
            let delta_ticks = pending_delta + reader.read_varlen()?;
            pending_delta = 0;

            let lead = reader.peek_u8()?;
            let status = if lead & 0x80 != 0 {
                reader.read_u8()?;
                if lead < 0xF0 {
                    running = Some(lead);
                }
                lead
            } else {
                // Running status: the byte just peeked is the first data
                // byte and stays in the reader for the dispatch below.
                running.ok_or_else(|| {
                    inv_data(&reader, MalformedEventError::OrphanRunningStatus { byte: lead })
                })?
            };

            let event = match status {
                0xFF => match decode_meta(&mut reader)? {
                    MetaOutcome::Event(event) => event,
                    MetaOutcome::TrackName(text) => {
                        if name.is_none() {
                            name = Some(text);
                        }
                        pending_delta = delta_ticks;
                        continue;
                    }
                },
                0xF0 | 0xF7 => {
                    let data = read_payload(&mut reader)?;
                    Event::Other(OtherEvent {
                        kind: OtherKind::SysEx,
                        data: data.to_vec(),
                    })
                }
                0xF1..=0xF6 | 0xF8..=0xFE => {
                    // Stray system common/real-time bytes: capture their
                    // fixed data-byte count so later events stay in sync.
                    let len = match status {
                        0xF1 | 0xF3 => 1,
                        0xF2 => 2,
                        _ => 0,
                    };
                    let data = reader.read_bytes(len)?;
                    Event::Other(OtherEvent {
                        kind: OtherKind::System(status),
                        data: data.to_vec(),
                    })
                }
                _ => decode_channel_event(&mut reader, status)?,
            };

            events.push(TrackEvent::new(delta_ticks, event));
        }

        Ok(Self { name, events })
    }
}

enum MetaOutcome {
    Event(Event),
    TrackName(String),
}

fn decode_channel_event(reader: &mut Reader<'_>, status: u8) -> DecodeResult<Event> {
    let channel = status & 0x0F;
    let event = match status >> 4 {
        0x8 => Event::NoteOff {
            channel,
            note: reader.read_u8()?,
            velocity: reader.read_u8()?,
        },
        0x9 => Event::NoteOn {
            channel,
            note: reader.read_u8()?,
            velocity: reader.read_u8()?,
        },
        0xA => Event::PolyTouch {
            channel,
            note: reader.read_u8()?,
            value: reader.read_u8()?,
        },
        0xB => Event::ControlChange {
            channel,
            controller: reader.read_u8()?,
            value: reader.read_u8()?,
        },
        0xC => Event::ProgramChange {
            channel,
            program: reader.read_u8()?,
        },
        0xD => Event::Aftertouch {
            channel,
            value: reader.read_u8()?,
        },
        0xE => {
            let lsb = reader.read_u8()?;
            let msb = reader.read_u8()?;
            let combined = (i16::from(msb & 0x7F) << 7) | i16::from(lsb & 0x7F);
            Event::PitchWheel {
                channel,
                pitch: combined - 8192,
            }
        }
        // Statuses 0xF* are dispatched before this function is called,
        // and a clear high bit never becomes a status.
        _ => unreachable!("status byte {status:#04x} is not a channel message"),
    };
    Ok(event)
}

fn decode_meta(reader: &mut Reader<'_>) -> DecodeResult<MetaOutcome> {
    let meta_type = reader.read_u8()?;
    let data = read_payload(reader)?;

    let expect_len = |wanted: usize| {
        if data.len() == wanted {
            Ok(())
        } else {
            Err(MalformedEventError::MetaLength {
                meta_type,
                declared: data.len() as u32,
            })
        }
    };

    let event = match meta_type {
        0x03 => {
            return Ok(MetaOutcome::TrackName(
                String::from_utf8_lossy(data).into_owned(),
            ));
        }
        0x51 => {
            expect_len(3).map_err(|e| inv_data(reader, e))?;
            Event::SetTempo {
                micros_per_beat: u32::from_be_bytes([0, data[0], data[1], data[2]]),
            }
        }
        0x58 => {
            expect_len(4).map_err(|e| inv_data(reader, e))?;
            let exponent = data[1];
            if exponent > 15 {
                return Err(inv_data(
                    reader,
                    MalformedEventError::DenominatorOutOfRange(exponent),
                ));
            }
            Event::TimeSignature {
                numerator: data[0],
                denominator: 1u16 << exponent,
                clocks_per_click: data[2],
                notated_32nds_per_quarter: data[3],
            }
        }
        0x59 => {
            expect_len(2).map_err(|e| inv_data(reader, e))?;
            let sharps = data[0] as i8;
            if !(-7..=7).contains(&sharps) {
                return Err(inv_data(
                    reader,
                    MalformedEventError::KeySignatureOutOfRange(sharps),
                ));
            }
            Event::KeySignature {
                sharps,
                minor: data[1] != 0,
            }
        }
        _ => Event::Other(OtherEvent {
            kind: OtherKind::Meta(meta_type),
            data: data.to_vec(),
        }),
    };
    Ok(MetaOutcome::Event(event))
}

/// Read a varlen-prefixed payload, rejecting lengths past track bounds.
fn read_payload<'a>(reader: &mut Reader<'a>) -> DecodeResult<&'a [u8]> {
    let declared = reader.read_varlen()?;
    if declared as usize > reader.remaining() {
        return Err(inv_data(
            reader,
            MalformedEventError::PayloadOverrun { declared },
        ));
    }
    reader.read_bytes(declared as usize)
}

#[cfg(test)]
use crate::reader::DecodeErrorKind;

#[test]
fn decodes_note_pair() {
    let bytes = [
        0x00, 0x90, 0x3C, 0x64, // NoteOn C4 vel 100
        0x83, 0x60, 0x80, 0x3C, 0x00, // delta 480, NoteOff C4
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 2);
    assert_eq!(track.events()[0].delta_ticks(), 0);
    assert_eq!(
        track.events()[0].event(),
        &Event::NoteOn {
            channel: 0,
            note: 60,
            velocity: 100
        }
    );
    assert_eq!(track.events()[1].delta_ticks(), 480);
    assert_eq!(
        track.events()[1].event(),
        &Event::NoteOff {
            channel: 0,
            note: 60,
            velocity: 0
        }
    );
}

#[test]
fn running_status_reuses_previous_status() {
    let bytes = [
        0x00, 0x93, 0x3C, 0x64, // explicit NoteOn ch 3
        0x10, 0x40, 0x50, // running NoteOn, different note/velocity
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 2);
    assert_eq!(
        track.events()[0].event(),
        &Event::NoteOn {
            channel: 3,
            note: 0x3C,
            velocity: 0x64
        }
    );
    assert_eq!(
        track.events()[1].event(),
        &Event::NoteOn {
            channel: 3,
            note: 0x40,
            velocity: 0x50
        }
    );
}

#[test]
fn note_on_velocity_zero_stays_note_on() {
    let bytes = [0x00, 0x90, 0x3C, 0x00];
    let track = Track::decode(&bytes).unwrap();
    assert!(matches!(
        track.events()[0].event(),
        Event::NoteOn { velocity: 0, .. }
    ));
}

#[test]
fn orphan_running_status_is_malformed() {
    let bytes = [0x00, 0x3C, 0x64];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::MalformedEvent(MalformedEventError::OrphanRunningStatus { byte: 0x3C })
    ));
}

#[test]
fn pitch_wheel_recenters_on_zero() {
    // Center position: lsb 0x00, msb 0x40.
    let bytes = [0x00, 0xE0, 0x00, 0x40, 0x00, 0xE0, 0x00, 0x00];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(
        track.events()[0].event(),
        &Event::PitchWheel {
            channel: 0,
            pitch: 0
        }
    );
    assert_eq!(
        track.events()[1].event(),
        &Event::PitchWheel {
            channel: 0,
            pitch: -8192
        }
    );
}

#[test]
fn track_name_is_absorbed_not_emitted() {
    let bytes = [
        0x00, 0xFF, 0x03, 0x05, b'P', b'i', b'a', b'n', b'o', // name
        0x00, 0x90, 0x3C, 0x64,
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.name(), Some("Piano"));
    assert_eq!(track.events().len(), 1);
    assert!(matches!(track.events()[0].event(), Event::NoteOn { .. }));
}

#[test]
fn absorbed_name_delta_carries_forward() {
    let bytes = [
        0x60, 0xFF, 0x03, 0x01, b'x', // name at delta 96
        0x20, 0x90, 0x3C, 0x64, // note 32 ticks later
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 1);
    assert_eq!(track.events()[0].delta_ticks(), 0x80);
}

#[test]
fn set_tempo_decodes_big_endian() {
    let bytes = [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(
        track.events()[0].event(),
        &Event::SetTempo {
            micros_per_beat: 500_000
        }
    );
}

#[test]
fn time_signature_expands_denominator() {
    let bytes = [0x00, 0xFF, 0x58, 0x04, 0x06, 0x03, 0x24, 0x08];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(
        track.events()[0].event(),
        &Event::TimeSignature {
            numerator: 6,
            denominator: 8,
            clocks_per_click: 36,
            notated_32nds_per_quarter: 8
        }
    );
}

#[test]
fn key_signature_decodes_signed_sharps() {
    let bytes = [0x00, 0xFF, 0x59, 0x02, 0xFD, 0x01];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(
        track.events()[0].event(),
        &Event::KeySignature {
            sharps: -3,
            minor: true
        }
    );
}

#[test]
fn unrecognized_meta_becomes_other() {
    let bytes = [0x00, 0xFF, 0x2F, 0x00];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(
        track.events()[0].event(),
        &Event::Other(OtherEvent {
            kind: OtherKind::Meta(0x2F),
            data: vec![]
        })
    );
}

#[test]
fn sysex_does_not_desynchronize() {
    let bytes = [
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // sysex payload
        0x00, 0x90, 0x3C, 0x64, // the next event still decodes
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 2);
    assert_eq!(
        track.events()[0].event(),
        &Event::Other(OtherEvent {
            kind: OtherKind::SysEx,
            data: vec![0x43, 0x12, 0xF7]
        })
    );
    assert!(matches!(track.events()[1].event(), Event::NoteOn { .. }));
}

#[test]
fn running_status_survives_meta_events() {
    let bytes = [
        0x00, 0x90, 0x3C, 0x64, // explicit NoteOn
        0x00, 0xFF, 0x2F, 0x00, // end of track meta
        0x00, 0x40, 0x00, // running NoteOn after the meta
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 3);
    assert_eq!(
        track.events()[2].event(),
        &Event::NoteOn {
            channel: 0,
            note: 0x40,
            velocity: 0
        }
    );
}

#[test]
fn stray_system_bytes_keep_later_events_in_sync() {
    let bytes = [
        0x00, 0xF2, 0x12, 0x34, // song position, two data bytes
        0x00, 0xF8, // timing clock, no data bytes
        0x00, 0x90, 0x3C, 0x64, // the note still decodes cleanly
    ];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 3);
    assert_eq!(
        track.events()[0].event(),
        &Event::Other(OtherEvent {
            kind: OtherKind::System(0xF2),
            data: vec![0x12, 0x34]
        })
    );
    assert_eq!(
        track.events()[1].event(),
        &Event::Other(OtherEvent {
            kind: OtherKind::System(0xF8),
            data: vec![]
        })
    );
    assert_eq!(
        track.events()[2].event(),
        &Event::NoteOn {
            channel: 0,
            note: 0x3C,
            velocity: 0x64
        }
    );
}

#[test]
fn quarter_frame_consumes_one_data_byte() {
    let bytes = [0x00, 0xF1, 0x25, 0x00, 0x90, 0x3C, 0x64];
    let track = Track::decode(&bytes).unwrap();
    assert_eq!(track.events().len(), 2);
    assert_eq!(
        track.events()[0].event(),
        &Event::Other(OtherEvent {
            kind: OtherKind::System(0xF1),
            data: vec![0x25]
        })
    );
    assert!(matches!(track.events()[1].event(), Event::NoteOn { .. }));
}

#[test]
fn time_signature_exponent_out_of_range_is_malformed() {
    let bytes = [0x00, 0xFF, 0x58, 0x04, 0x04, 0x10, 0x18, 0x08];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::MalformedEvent(MalformedEventError::DenominatorOutOfRange(16))
    ));
}

#[test]
fn key_signature_beyond_seven_sharps_is_malformed() {
    let bytes = [0x00, 0xFF, 0x59, 0x02, 0x08, 0x00];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::MalformedEvent(MalformedEventError::KeySignatureOutOfRange(8))
    ));
}

#[test]
fn meta_payload_overrun_is_malformed() {
    let bytes = [0x00, 0xFF, 0x01, 0x7F, b'h', b'i'];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::MalformedEvent(MalformedEventError::PayloadOverrun { declared: 0x7F })
    ));
}

#[test]
fn tempo_with_wrong_length_is_malformed() {
    let bytes = [0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(matches!(
        err.kind(),
        DecodeErrorKind::MalformedEvent(MalformedEventError::MetaLength {
            meta_type: 0x51,
            declared: 2
        })
    ));
}

#[test]
fn truncated_data_bytes_are_truncated_input() {
    let bytes = [0x00, 0x90, 0x3C];
    let err = Track::decode(&bytes).unwrap_err();
    assert!(err.is_truncated());
}
