use super::traits::{invalid, ConfigSection};
use crate::error::MuseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiConfig {
    pub tempo_bpm: u16,
    pub velocity: u8,
    /// General MIDI program number (0 = Acoustic Grand Piano)
    pub instrument: u8,
    pub ticks_per_beat: u16,
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120,
            velocity: 64,
            instrument: 0,
            ticks_per_beat: 480,
        }
    }
}

impl ConfigSection for MidiConfig {
    fn section_name() -> &'static str {
        "midi"
    }

    fn validate(&self) -> Result<(), MuseError> {
        // Slower tempos overflow the 24-bit microseconds-per-beat field
        if self.tempo_bpm < 4 {
            return Err(invalid::<Self>("Tempo must be at least 4 BPM"));
        }
        if self.velocity > 127 {
            return Err(invalid::<Self>("Velocity must be at most 127"));
        }
        if self.instrument > 127 {
            return Err(invalid::<Self>("Instrument must be at most 127"));
        }
        // SMF metrical timing is a 15-bit field
        if self.ticks_per_beat == 0 || self.ticks_per_beat > 0x7FFF {
            return Err(invalid::<Self>("Ticks per beat must be in 1..=32767"));
        }
        Ok(())
    }
}

impl MidiConfig {
    pub fn microseconds_per_beat(&self) -> u32 {
        60_000_000 / self.tempo_bpm as u32
    }
}
