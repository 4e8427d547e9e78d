// Standard MIDI File output for note event streams.
//
// Writes a single-track SMF (format 0): tempo, program change, then the
// note events on channel 0. Uses the `midly` crate.

use super::events::{total_ticks, NoteEvent, NoteEventKind};
use crate::config::{ConfigSection, MidiConfig};
use crate::error::{MuseError, Result};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Largest delta time a track event can carry
const MAX_DELTA_TICKS: u32 = 0x0FFF_FFFF;

const TRACK_NAME: &[u8] = b"Melodic Muse";

pub struct MidiWriter {
    config: MidiConfig,
    channel: u4,
}

impl MidiWriter {
    pub fn new(config: MidiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            channel: u4::new(0),
        })
    }

    /// Serialize events to SMF bytes
    pub fn to_bytes(&self, events: &[NoteEvent]) -> Result<Vec<u8>> {
        let smf = self.to_smf(events)?;
        let mut buf = Vec::new();
        smf.write_std(&mut buf)?;
        Ok(buf)
    }

    /// Serialize events and write them to `path`
    pub fn write(&self, events: &[NoteEvent], path: &Path) -> Result<()> {
        let buf = self.to_bytes(events)?;
        std::fs::write(path, &buf)?;
        log::info!(
            "Wrote {} note events ({} ticks, {} bytes) to {}",
            events.len(),
            total_ticks(events),
            buf.len(),
            path.display()
        );
        Ok(())
    }

    fn to_smf(&self, events: &[NoteEvent]) -> Result<Smf<'static>> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.config.ticks_per_beat)),
        ));

        let mut track: Track<'static> = Vec::with_capacity(events.len() + 4);
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME)),
        });
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(
                self.config.microseconds_per_beat(),
            ))),
        });
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: self.channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(self.config.instrument),
                },
            },
        });

        for event in events {
            track.push(self.track_event(event)?);
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);

        Ok(smf)
    }

    fn track_event(&self, event: &NoteEvent) -> Result<TrackEvent<'static>> {
        if event.pitch > 127 || event.velocity > 127 {
            return Err(MuseError::Precondition(format!(
                "note event out of MIDI range: pitch {}, velocity {}",
                event.pitch, event.velocity
            )));
        }
        if event.delta_ticks > MAX_DELTA_TICKS {
            return Err(MuseError::Precondition(format!(
                "delta of {} ticks does not fit in a MIDI event",
                event.delta_ticks
            )));
        }

        let key = u7::new(event.pitch);
        let vel = u7::new(event.velocity);
        let message = match event.kind {
            NoteEventKind::On => MidiMessage::NoteOn { key, vel },
            NoteEventKind::Off => MidiMessage::NoteOff { key, vel },
        };

        Ok(TrackEvent {
            delta: u28::new(event.delta_ticks),
            kind: TrackEventKind::Midi {
                channel: self.channel,
                message,
            },
        })
    }
}

/// Read the note events back out of SMF bytes, folding non-note deltas into
/// the following note event.
///
/// A folded delta that no longer fits in `u32` ticks is rejected.
pub fn read_note_events(bytes: &[u8]) -> Result<Vec<NoteEvent>> {
    let smf = Smf::parse(bytes)?;
    let mut events = Vec::new();

    for track in &smf.tracks {
        let mut pending: u64 = 0;
        for event in track {
            pending += u64::from(event.delta.as_int());
            let (kind, key, vel) = match event.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, vel },
                    ..
                } => (NoteEventKind::On, key, vel),
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOff { key, vel },
                    ..
                } => (NoteEventKind::Off, key, vel),
                _ => continue,
            };
            events.push(NoteEvent {
                kind,
                pitch: key.as_int(),
                velocity: vel.as_int(),
                delta_ticks: u32::try_from(pending).map_err(|_| {
                    MuseError::Precondition(format!(
                        "{} ticks before note {} do not fit in a note event",
                        pending,
                        key.as_int()
                    ))
                })?,
            });
            pending = 0;
        }
    }

    Ok(events)
}
