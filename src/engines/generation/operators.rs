use crate::engines::generation::genome::{pitch_buffer, NoteSequence, Population};
use crate::error::{MuseError, Result};
use crate::types::PitchRange;
use rand::seq::index::sample_weighted;
use rand::Rng;

/// Roulette wheel selection of two distinct indices, probability
/// proportional to fitness.
///
/// Requires at least two individuals and strictly positive, finite scores.
pub fn select_parent_indices<R: Rng>(
    population: &[NoteSequence],
    fitness_scores: &[f64],
    rng: &mut R,
) -> Result<(usize, usize)> {
    if population.len() != fitness_scores.len() {
        return Err(MuseError::Precondition(format!(
            "population has {} individuals but {} fitness scores",
            population.len(),
            fitness_scores.len()
        )));
    }
    if population.len() < 2 {
        return Err(MuseError::Precondition(format!(
            "selection needs at least 2 individuals, got {}",
            population.len()
        )));
    }
    if let Some(bad) = fitness_scores.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
        return Err(MuseError::Precondition(format!(
            "fitness scores must be positive and finite, got {}",
            bad
        )));
    }

    // Normalize fitness to probabilities
    let total_fitness: f64 = fitness_scores.iter().sum();
    let picked = sample_weighted(
        rng,
        population.len(),
        |i| fitness_scores[i] / total_fitness,
        2,
    )
    .map_err(|e| MuseError::Precondition(format!("weighted selection failed: {}", e)))?;

    Ok((picked.index(0), picked.index(1)))
}

/// Roulette wheel selection returning the two parents themselves
pub fn select_parents<'a, R: Rng>(
    population: &'a [NoteSequence],
    fitness_scores: &[f64],
    rng: &mut R,
) -> Result<(&'a NoteSequence, &'a NoteSequence)> {
    let (a, b) = select_parent_indices(population, fitness_scores, rng)?;
    Ok((&population[a], &population[b]))
}

/// Single-point crossover: prefix of `parent1`, suffix of `parent2`
pub fn crossover<R: Rng>(
    parent1: &NoteSequence,
    parent2: &NoteSequence,
    rng: &mut R,
) -> Result<NoteSequence> {
    let len = parent1.len();
    if parent2.len() != len {
        return Err(MuseError::Precondition(format!(
            "crossover parents differ in length ({} vs {})",
            len,
            parent2.len()
        )));
    }
    if len < 2 {
        return Err(MuseError::Precondition(
            "crossover needs sequences of length at least 2".to_string(),
        ));
    }

    let point = rng.gen_range(1..len);
    splice(parent1, parent2, point)
}

/// `parent1[..point]` followed by `parent2[point..]`
pub(crate) fn splice(
    parent1: &NoteSequence,
    parent2: &NoteSequence,
    point: usize,
) -> Result<NoteSequence> {
    let mut child = pitch_buffer(parent1.len())?;
    child.extend_from_slice(&parent1[..point]);
    child.extend_from_slice(&parent2[point..]);
    NoteSequence::new(child)
}

/// Mutation: each position independently redrawn with probability
/// `mutation_rate`. The input is left untouched.
pub fn mutate<R: Rng>(
    individual: &NoteSequence,
    mutation_rate: f64,
    pitch_range: PitchRange,
    rng: &mut R,
) -> Result<NoteSequence> {
    if !(0.0..=1.0).contains(&mutation_rate) {
        return Err(MuseError::Precondition(format!(
            "mutation rate must be within [0, 1], got {}",
            mutation_rate
        )));
    }

    let mut pitches = pitch_buffer(individual.len())?;
    pitches.extend_from_slice(individual);
    for pitch in pitches.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *pitch = rng.gen_range(pitch_range.as_range());
        }
    }
    NoteSequence::new(pitches)
}

/// Generate a random population, reporting allocation failure instead of
/// aborting.
pub fn random_population<R: Rng>(
    size: usize,
    length: usize,
    pitch_range: PitchRange,
    rng: &mut R,
) -> Result<Population> {
    let mut population = empty_population(size, length)?;
    for _ in 0..size {
        population.push(NoteSequence::random(length, pitch_range, rng)?);
    }
    Ok(population)
}

/// Empty population with room for `size` individuals of `length` pitches
pub fn empty_population(size: usize, length: usize) -> Result<Population> {
    size.checked_mul(length).ok_or_else(|| {
        MuseError::ResourceExhausted(format!(
            "population of {} x {} pitches overflows",
            size, length
        ))
    })?;

    let mut population = Population::new();
    population.try_reserve_exact(size).map_err(|e| {
        MuseError::ResourceExhausted(format!("cannot allocate population of {}: {}", size, e))
    })?;
    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seq(pitches: &[u8]) -> NoteSequence {
        NoteSequence::new(pitches.to_vec()).unwrap()
    }

    #[test]
    fn test_crossover_every_point() {
        let a = seq(&[60, 61, 62, 63, 64]);
        let b = seq(&[70, 71, 72, 73, 74]);

        for point in 1..a.len() {
            let child = splice(&a, &b, point).unwrap();
            assert_eq!(child.len(), a.len());
            assert_eq!(&child[..point], &a[..point]);
            assert_eq!(&child[point..], &b[point..]);
        }
    }

    #[test]
    fn test_crossover_random_point_is_a_valid_splice() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = seq(&[60, 60, 60, 60]);
        let b = seq(&[70, 70, 70, 70]);

        for _ in 0..100 {
            let child = crossover(&a, &b, &mut rng).unwrap();
            let point = child.iter().position(|&p| p == 70).unwrap();
            assert!((1..4).contains(&point));
            assert!(child[point..].iter().all(|&p| p == 70));
        }
    }

    #[test]
    fn test_crossover_rejects_mismatched_parents() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(crossover(&seq(&[60, 61]), &seq(&[60, 61, 62]), &mut rng)
            .unwrap_err()
            .is_precondition());
        assert!(crossover(&seq(&[60]), &seq(&[61]), &mut rng)
            .unwrap_err()
            .is_precondition());
    }

    #[test]
    fn test_mutate_zero_rate_is_identity() {
        let mut rng = StdRng::seed_from_u64(11);
        let original = seq(&[60, 65, 67, 71, 62, 64]);
        let mutated = mutate(&original, 0.0, PitchRange::MIDDLE_OCTAVE, &mut rng).unwrap();
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_mutate_full_rate_redraws_every_position() {
        let mut rng = StdRng::seed_from_u64(11);
        // Nothing in the original lies inside the draw range, so every
        // redrawn position must differ.
        let original = seq(&[10; 32]);
        let range = PitchRange::new(60, 64).unwrap();
        let mutated = mutate(&original, 1.0, range, &mut rng).unwrap();
        assert!(mutated.within(range));
        assert_eq!(original, seq(&[10; 32]));
    }

    #[test]
    fn test_mutate_full_rate_change_frequency() {
        let mut rng = StdRng::seed_from_u64(5);
        let range = PitchRange::new(60, 64).unwrap();
        let original = seq(&[60; 1000]);
        let mutated = mutate(&original, 1.0, range, &mut rng).unwrap();
        let changed = mutated.iter().filter(|&&p| p != 60).count();
        // Expected 1 - 1/4 = 0.75 of positions
        assert!((650..=850).contains(&changed), "changed {}", changed);
    }

    #[test]
    fn test_mutate_rejects_bad_rate() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = seq(&[60, 61]);
        for rate in [-0.1, 1.01, f64::NAN] {
            assert!(mutate(&s, rate, PitchRange::MIDDLE_OCTAVE, &mut rng)
                .unwrap_err()
                .is_precondition());
        }
    }

    #[test]
    fn test_selection_indices_are_distinct() {
        let mut rng = StdRng::seed_from_u64(99);
        let population: Vec<_> = (0..5).map(|i| seq(&[60 + i, 60])).collect();
        let scores = vec![0.5, 1.0, 0.5, 1.0, 0.5];

        for _ in 0..500 {
            let (a, b) = select_parent_indices(&population, &scores, &mut rng).unwrap();
            assert_ne!(a, b);
            assert!(a < 5 && b < 5);
        }
    }

    #[test]
    fn test_selection_two_individuals_favours_fitter() {
        let mut rng = StdRng::seed_from_u64(2024);
        let population = vec![seq(&[60, 61]), seq(&[60, 60])];
        let scores = vec![1.0, 0.01];

        let mut fitter_first = 0;
        let mut weaker_first = 0;
        for _ in 0..2000 {
            let (a, b) = select_parent_indices(&population, &scores, &mut rng).unwrap();
            assert_ne!(a, b);
            if a == 0 {
                fitter_first += 1;
            } else {
                weaker_first += 1;
            }
        }
        assert!(weaker_first > 0, "weaker individual never chosen first");
        assert!(fitter_first > weaker_first * 10);
    }

    #[test]
    fn test_selection_preconditions() {
        let mut rng = StdRng::seed_from_u64(0);
        let one = vec![seq(&[60, 61])];
        assert!(select_parents(&one, &[1.0], &mut rng).unwrap_err().is_precondition());

        let two = vec![seq(&[60, 61]), seq(&[62, 63])];
        assert!(select_parents(&two, &[1.0], &mut rng).unwrap_err().is_precondition());
        assert!(select_parents(&two, &[0.0, 0.0], &mut rng).unwrap_err().is_precondition());
        assert!(select_parents(&two, &[1.0, f64::NAN], &mut rng).unwrap_err().is_precondition());
    }

    #[test]
    fn test_empty_population_reports_exhaustion() {
        let err = empty_population(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, MuseError::ResourceExhausted(_)));
    }
}
