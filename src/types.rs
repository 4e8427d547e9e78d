use crate::error::MuseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MIDI note number (0..=127)
pub type Pitch = u8;

/// Half-open pitch range `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchRange {
    pub low: Pitch,
    pub high: Pitch,
}

impl PitchRange {
    /// One octave up from middle C
    pub const MIDDLE_OCTAVE: PitchRange = PitchRange { low: 60, high: 72 };

    pub fn new(low: Pitch, high: Pitch) -> Result<Self, MuseError> {
        if low >= high {
            return Err(MuseError::Precondition(format!(
                "pitch range [{}, {}) is empty",
                low, high
            )));
        }
        if high > 128 {
            return Err(MuseError::Precondition(format!(
                "pitch range upper bound {} exceeds MIDI range",
                high
            )));
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        pitch >= self.low && pitch < self.high
    }

    /// Number of distinct pitches in the range
    pub fn width(&self) -> usize {
        (self.high - self.low) as usize
    }

    pub fn as_range(&self) -> std::ops::Range<Pitch> {
        self.low..self.high
    }
}

impl Default for PitchRange {
    fn default() -> Self {
        Self::MIDDLE_OCTAVE
    }
}

/// Mood requested by the user. Only the non-evolutionary generators act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Upbeat,
    Melancholic,
    Mysterious,
    Energetic,
}

impl Mood {
    pub const ALL: [Mood; 4] = [
        Mood::Upbeat,
        Mood::Melancholic,
        Mood::Mysterious,
        Mood::Energetic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Upbeat => "upbeat",
            Mood::Melancholic => "melancholic",
            Mood::Mysterious => "mysterious",
            Mood::Energetic => "energetic",
        }
    }

    /// Semitone offsets above the base note
    pub fn scale(&self) -> &'static [u8] {
        match self {
            Mood::Upbeat => &[0, 2, 4, 5, 7, 9, 11, 12],      // Major
            Mood::Melancholic => &[0, 2, 3, 5, 7, 8, 10, 12], // Natural minor
            Mood::Mysterious => &[0, 2, 4, 6, 8, 10, 12],     // Whole tone
            Mood::Energetic => &[0, 3, 4, 7, 9, 10, 12],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = MuseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                MuseError::Configuration(format!(
                    "unknown mood '{}', expected one of: upbeat, melancholic, mysterious, energetic",
                    s
                ))
            })
    }
}

/// Generation technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technique {
    #[serde(rename = "rule_based")]
    RuleBased,
    #[serde(rename = "procedural")]
    Procedural,
    #[serde(rename = "genetic_algorithm")]
    Genetic,
    #[serde(rename = "sound_synthesis")]
    Synthesis,
}

impl Technique {
    pub fn name(&self) -> &'static str {
        match self {
            Technique::RuleBased => "rule_based",
            Technique::Procedural => "procedural",
            Technique::Genetic => "genetic_algorithm",
            Technique::Synthesis => "sound_synthesis",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = MuseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rule_based" => Ok(Technique::RuleBased),
            "procedural" => Ok(Technique::Procedural),
            "genetic_algorithm" => Ok(Technique::Genetic),
            "sound_synthesis" => Ok(Technique::Synthesis),
            other => Err(MuseError::Configuration(format!(
                "unknown technique '{}', expected one of: rule_based, procedural, genetic_algorithm, sound_synthesis",
                other
            ))),
        }
    }
}

/// A single note with its length, ready for event encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedNote {
    pub pitch: Pitch,
    pub duration_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_range_bounds() {
        assert!(PitchRange::new(60, 60).is_err());
        assert!(PitchRange::new(64, 60).is_err());
        assert!(PitchRange::new(100, 129).is_err());

        let range = PitchRange::new(60, 64).unwrap();
        assert_eq!(range.width(), 4);
        assert!(range.contains(60));
        assert!(range.contains(63));
        assert!(!range.contains(64));
    }

    #[test]
    fn test_parse_mood_and_technique() {
        assert_eq!("melancholic".parse::<Mood>().unwrap(), Mood::Melancholic);
        assert!("grumpy".parse::<Mood>().is_err());

        assert_eq!(
            "genetic_algorithm".parse::<Technique>().unwrap(),
            Technique::Genetic
        );
        for t in [
            Technique::RuleBased,
            Technique::Procedural,
            Technique::Genetic,
            Technique::Synthesis,
        ] {
            assert_eq!(t.name().parse::<Technique>().unwrap(), t);
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.name()));
        }
    }
}
