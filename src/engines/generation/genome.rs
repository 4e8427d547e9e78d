//! Genome representation for melody evolution
//!
//! A genome is a fixed-length sequence of MIDI pitches. Every individual in a
//! run shares the same length; crossover and mutation never change it.
//!
//! `NoteSequence` can never be empty, so fitness is always defined. Values
//! are never shared between population members: operators build new
//! sequences rather than editing their inputs.

use crate::error::{MuseError, Result};
use crate::types::{Pitch, PitchRange};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pitch>", into = "Vec<Pitch>")]
pub struct NoteSequence(Vec<Pitch>);

impl NoteSequence {
    pub fn new(pitches: Vec<Pitch>) -> Result<Self> {
        if pitches.is_empty() {
            return Err(MuseError::Precondition(
                "note sequence must contain at least one pitch".to_string(),
            ));
        }
        Ok(Self(pitches))
    }

    /// Uniformly random sequence of `length` pitches drawn from `range`
    pub fn random<R: Rng>(length: usize, range: PitchRange, rng: &mut R) -> Result<Self> {
        let mut pitches = pitch_buffer(length)?;
        pitches.extend((0..length).map(|_| rng.gen_range(range.as_range())));
        Self::new(pitches)
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.0
    }

    /// True when every pitch lies in `range`
    pub fn within(&self, range: PitchRange) -> bool {
        self.0.iter().all(|&p| range.contains(p))
    }
}

impl Deref for NoteSequence {
    type Target = [Pitch];

    fn deref(&self) -> &[Pitch] {
        &self.0
    }
}

impl TryFrom<Vec<Pitch>> for NoteSequence {
    type Error = MuseError;

    fn try_from(pitches: Vec<Pitch>) -> Result<Self> {
        Self::new(pitches)
    }
}

impl From<NoteSequence> for Vec<Pitch> {
    fn from(sequence: NoteSequence) -> Self {
        sequence.0
    }
}

/// Empty pitch buffer with room for `length` pitches
pub(crate) fn pitch_buffer(length: usize) -> Result<Vec<Pitch>> {
    let mut pitches = Vec::new();
    pitches.try_reserve_exact(length).map_err(|e| {
        MuseError::ResourceExhausted(format!("cannot allocate {} pitches: {}", length, e))
    })?;
    Ok(pitches)
}

/// Population of one generation
pub type Population = Vec<NoteSequence>;
