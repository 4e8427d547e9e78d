use crate::error::{MuseError, Result};
use crate::types::{Pitch, TimedNote};

/// Highest valid MIDI data byte
pub const MAX_DATA_BYTE: u8 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEventKind {
    On,
    Off,
}

/// One note boundary, timed relative to the previous event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub kind: NoteEventKind,
    pub pitch: Pitch,
    pub velocity: u8,
    pub delta_ticks: u32,
}

/// Spread a melody evenly over one beat; every note gets at least one tick
pub fn sequence_to_timed_notes(pitches: &[Pitch], ticks_per_beat: u16) -> Vec<TimedNote> {
    if pitches.is_empty() {
        return Vec::new();
    }
    let duration_ticks = (ticks_per_beat as u32 / pitches.len() as u32).max(1);
    pitches
        .iter()
        .map(|&pitch| TimedNote { pitch, duration_ticks })
        .collect()
}

/// Encode notes as a linear stream of paired note-on / note-off events.
///
/// Each note starts as soon as the previous one ends, and ends after its
/// duration.
pub fn encode_events(notes: &[TimedNote], velocity: u8) -> Result<Vec<NoteEvent>> {
    if velocity > MAX_DATA_BYTE {
        return Err(MuseError::Precondition(format!(
            "velocity {} is outside the MIDI range",
            velocity
        )));
    }

    let mut events = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        if note.pitch > MAX_DATA_BYTE {
            return Err(MuseError::Precondition(format!(
                "pitch {} is outside the MIDI range",
                note.pitch
            )));
        }
        events.push(NoteEvent {
            kind: NoteEventKind::On,
            pitch: note.pitch,
            velocity,
            delta_ticks: 0,
        });
        events.push(NoteEvent {
            kind: NoteEventKind::Off,
            pitch: note.pitch,
            velocity,
            delta_ticks: note.duration_ticks,
        });
    }
    Ok(events)
}

/// Absolute length of an event stream in ticks
pub fn total_ticks(events: &[NoteEvent]) -> u64 {
    events.iter().map(|e| e.delta_ticks as u64).sum()
}
