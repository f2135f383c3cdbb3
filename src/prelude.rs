#![doc = r#"
Re-exports the types you'll probably need.

```rust
use miditrace::prelude::*;
```
"#]

pub use crate::{
    event::{Event, OtherEvent, OtherKind},
    file::{FormatType, MidiFile, Track, TrackEvent},
    note::{Key, NoteName},
    reader::{
        DecodeError, DecodeErrorKind, DecodeResult, InvalidChunkError, InvalidHeaderError,
        MalformedEventError, Reader, TruncatedInputError,
    },
    timing::{DEFAULT_TEMPO, TempoMap},
    trace,
};
