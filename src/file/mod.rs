#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

mod chunk;

mod format;
pub use format::*;

mod track;
pub use track::*;

use crate::{
    event::Event,
    reader::{DecodeResult, Reader},
    timing::TempoMap,
};

#[doc = r#"
A fully decoded Standard MIDI File.

Holds the header fields and every track's event list. The input buffer
is only borrowed for the duration of [`MidiFile::parse`]; the decoded
file owns its data outright.
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct MidiFile {
    format: FormatType,
    ticks_per_beat: u16,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct.
    ///
    /// Reads the `MThd` chunk, then exactly as many `MTrk` chunks as the
    /// header declares, skipping unknown chunks in between. Any decode
    /// failure is fatal for this file; there is no partial output.
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = chunk::read_header(&mut reader)?;

        let mut tracks = Vec::with_capacity(usize::from(header.num_tracks));
        for _ in 0..header.num_tracks {
            let payload = chunk::read_track_chunk(&mut reader)?;
            tracks.push(Track::decode(payload)?);
        }

        Ok(Self {
            format: header.format,
            ticks_per_beat: header.ticks_per_beat,
            tracks,
        })
    }

    /// Returns the format type for the file.
    pub const fn format(&self) -> FormatType {
        self.format
    }

    /// Ticks per quarter note, always non-zero.
    pub const fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Returns the track list.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total length of the file in seconds.
    ///
    /// Each track is walked with its own [`TempoMap`], tempo state never
    /// crossing tracks; the file's length is the longest track's clock.
    pub fn length_seconds(&self) -> f64 {
        self.tracks
            .iter()
            .map(|track| {
                let mut tempo = TempoMap::new(self.ticks_per_beat);
                for timed in track.events() {
                    tempo.advance(timed.delta_ticks());
                    if let Event::SetTempo { micros_per_beat } = timed.event() {
                        tempo.observe_tempo(*micros_per_beat);
                    }
                }
                tempo.seconds()
            })
            .fold(0.0, f64::max)
    }
}
