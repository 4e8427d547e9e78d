use crate::error::{MuseError, Result};
use crate::types::{Mood, Pitch, TimedNote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Key used when the requested mood has no rule
pub const DEFAULT_RULE: &str = "default";

/// `(pitch, duration in beats)`
pub type RuleNote = (Pitch, f64);

/// Fixed melodies keyed by mood name.
///
/// On disk this is a JSON object: `{"upbeat": [[60, 0.5], [64, 1.0]], "default": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook {
    rules: HashMap<String, Vec<RuleNote>>,
}

impl RuleBook {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let book = Self::from_json_str(&contents)?;
        log::info!("Loaded {} rules from {}", book.rules.len(), path.display());
        Ok(book)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// The mood's melody, falling back to the default rule
    pub fn apply(&self, mood: Option<Mood>) -> Result<&[RuleNote]> {
        if let Some(notes) = mood.and_then(|m| self.rules.get(m.name())) {
            return Ok(notes.as_slice());
        }
        if let Some(m) = mood {
            log::debug!("No rule for mood '{}', using '{}'", m, DEFAULT_RULE);
        }
        self.rules
            .get(DEFAULT_RULE)
            .map(Vec::as_slice)
            .ok_or_else(|| MuseError::Rules(format!("rule book has no '{}' entry", DEFAULT_RULE)))
    }
}

/// Convert beat durations to ticks
pub fn rule_notes_to_timed(notes: &[RuleNote], ticks_per_beat: u16) -> Result<Vec<TimedNote>> {
    notes
        .iter()
        .map(|&(pitch, beats)| {
            if pitch > 127 {
                return Err(MuseError::Rules(format!("pitch {} is outside the MIDI range", pitch)));
            }
            if !(beats.is_finite() && beats > 0.0) {
                return Err(MuseError::Rules(format!(
                    "note {} has invalid duration {}",
                    pitch, beats
                )));
            }
            let ticks = (ticks_per_beat as f64 * beats).round();
            if ticks > u32::MAX as f64 {
                return Err(MuseError::Rules(format!("duration {} beats is too long", beats)));
            }
            Ok(TimedNote {
                pitch,
                duration_ticks: (ticks as u32).max(1),
            })
        })
        .collect()
}
