pub mod events;
pub mod midi;

pub use events::{encode_events, sequence_to_timed_notes, NoteEvent, NoteEventKind};
pub use midi::{read_note_events, MidiWriter};
