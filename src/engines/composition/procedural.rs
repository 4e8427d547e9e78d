use crate::error::{MuseError, Result};
use crate::types::{Mood, Pitch, TimedNote};
use rand::seq::SliceRandom;
use rand::Rng;

/// Middle C (C4)
pub const BASE_NOTE: Pitch = 60;

/// Scale-constrained random melody.
///
/// Each note is `BASE_NOTE` plus a random step of the mood's scale; without a
/// mood the major scale is used. Notes share one beat evenly.
pub fn generate_pattern<R: Rng>(
    length: usize,
    mood: Option<Mood>,
    ticks_per_beat: u16,
    rng: &mut R,
) -> Result<Vec<TimedNote>> {
    if length == 0 {
        return Err(MuseError::Precondition(
            "pattern length must be positive".to_string(),
        ));
    }

    let scale = mood.unwrap_or(Mood::Upbeat).scale();
    let duration_ticks = (ticks_per_beat as u32 / length as u32).max(1);

    let mut notes = Vec::with_capacity(length);
    for _ in 0..length {
        let step = scale.choose(rng).copied().unwrap_or(0);
        notes.push(TimedNote {
            pitch: BASE_NOTE + step,
            duration_ticks,
        });
    }
    Ok(notes)
}
