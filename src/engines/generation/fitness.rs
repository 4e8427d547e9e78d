use crate::engines::generation::genome::NoteSequence;
use std::collections::HashSet;

/// Pitch diversity: distinct pitches divided by sequence length, in (0, 1].
///
/// Depends only on the multiset of pitches, not their order.
pub fn fitness(sequence: &NoteSequence) -> f64 {
    let distinct: HashSet<_> = sequence.iter().collect();
    distinct.len() as f64 / sequence.len() as f64
}

/// Scores for a whole population, parallel to it
pub fn evaluate(population: &[NoteSequence]) -> Vec<f64> {
    population.iter().map(fitness).collect()
}

/// Index of the highest score; the first one wins ties
pub fn fittest_index(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
