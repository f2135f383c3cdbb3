#![doc = r#"
Decode Standard MIDI Files into readable event traces.

`miditrace` takes the raw bytes of a `.mid` file and produces an ordered
textual log of everything in it: one line per event, positioned in both
cumulative ticks and wall-clock seconds under the file's tempo changes.

# Example

```rust
use miditrace::prelude::*;

let bytes: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, // format 0, 1 track, 480 tpb
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x09, // MTrk, length 9
    0x00, 0x90, 0x3C, 0x64, // NoteOn C4, velocity 100
    0x83, 0x60, 0x80, 0x3C, 0x00, // 480 ticks later, NoteOff C4
];

let file = MidiFile::parse(bytes)?;
assert_eq!(file.ticks_per_beat(), 480);

let text = trace::render(&file);
assert!(text.contains("NOTE_ON  | Note: 60 (C4)"));
# Ok::<(), miditrace::reader::DecodeError>(())
```

Decoding is pure and deterministic: the same bytes always produce the
same trace or the same [`DecodeError`](reader::DecodeError). Errors are
fatal per file and never repair or truncate the output.
"#]
#![warn(missing_docs)]

pub mod event;
pub mod file;
pub mod note;
pub mod prelude;
pub mod reader;
pub mod timing;
pub mod trace;
