#![doc = r#"
Tick-to-second conversion under a mutable tempo.

A MIDI file positions events in ticks; how long a tick lasts depends on
the tempo in effect when it elapses. [`TempoMap`] walks one track's
delta-times in order, accumulating both ticks and wall-clock seconds,
and picks up tempo changes as they are observed.

Tempo state is deliberately per-track: each track starts over at the
default tempo, and a tempo event on one track never affects another.
"#]

/// The tempo assumed until a `SetTempo` event says otherwise,
/// in microseconds per quarter note. 120 BPM.
pub const DEFAULT_TEMPO: u32 = 500_000;

/// A stateful tick-to-second converter for one track.
#[derive(Debug, Clone)]
pub struct TempoMap {
    ticks_per_beat: u16,
    micros_per_beat: u32,
    ticks: u64,
    seconds: f64,
}

impl TempoMap {
    /// Start a fresh track walk at tick zero and the default tempo.
    pub const fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            micros_per_beat: DEFAULT_TEMPO,
            ticks: 0,
            seconds: 0.0,
        }
    }

    /// Advance by a delta-time.
    ///
    /// The delta elapses under the tempo in effect before this call;
    /// a tempo change takes effect only for deltas observed after it.
    pub fn advance(&mut self, delta_ticks: u32) {
        self.ticks += u64::from(delta_ticks);
        self.seconds += f64::from(delta_ticks) * f64::from(self.micros_per_beat)
            / f64::from(self.ticks_per_beat)
            / 1e6;
    }

    /// Take note of a tempo change for subsequent [`advance`](Self::advance) calls.
    pub fn observe_tempo(&mut self, micros_per_beat: u32) {
        self.micros_per_beat = micros_per_beat;
    }

    /// Cumulative ticks elapsed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cumulative seconds elapsed so far.
    pub const fn seconds(&self) -> f64 {
        self.seconds
    }

    /// The tempo currently in effect, in microseconds per quarter note.
    pub const fn micros_per_beat(&self) -> u32 {
        self.micros_per_beat
    }

    /// Beats per minute for a tempo in microseconds per quarter note.
    pub fn bpm(micros_per_beat: u32) -> f64 {
        60_000_000.0 / f64::from(micros_per_beat)
    }
}

#[test]
fn one_beat_at_default_tempo() {
    let mut map = TempoMap::new(480);
    assert_eq!(map.micros_per_beat(), DEFAULT_TEMPO);
    map.advance(480);
    assert_eq!(map.ticks(), 480);
    assert!((map.seconds() - 0.5).abs() < 1e-9);
}

#[test]
fn tempo_change_applies_to_later_deltas_only() {
    let mut map = TempoMap::new(480);
    map.advance(240);
    let after_first = map.seconds();
    map.observe_tempo(1_000_000);
    assert_eq!(map.micros_per_beat(), 1_000_000);
    map.advance(240);

    assert!((after_first - 0.25).abs() < 1e-9);
    assert!((map.seconds() - 0.75).abs() < 1e-9);
    assert_eq!(map.ticks(), 480);
}

#[test]
fn observed_tempo_does_not_rewrite_history() {
    let mut map = TempoMap::new(96);
    map.advance(96);
    map.observe_tempo(250_000);
    assert!((map.seconds() - 0.5).abs() < 1e-9);
}

#[test]
fn bpm_of_default_tempo() {
    assert!((TempoMap::bpm(DEFAULT_TEMPO) - 120.0).abs() < 1e-9);
    assert!((TempoMap::bpm(1_000_000) - 60.0).abs() < 1e-9);
}
