use crate::config::EvolutionConfig;
use crate::engines::generation::evolution_engine::{EvolutionEngine, EvolutionOutcome};
use crate::engines::generation::progress::SilentProgress;
use crate::error::{MuseError, Result};
use rayon::prelude::*;

/// Run `count` independent evolutions in parallel.
///
/// Each run owns its RNG and population. With `config.seed` set, run `i` is
/// seeded with `seed + i`, so the batch is reproducible. Outcomes come back in
/// run order; the first failing run fails the whole batch.
pub fn evolve_candidates(config: &EvolutionConfig, count: usize) -> Result<Vec<EvolutionOutcome>> {
    log::info!("Evolving {} candidate melodies in parallel", count);

    (0..count)
        .into_par_iter()
        .map(|i| {
            let run_config = EvolutionConfig {
                seed: config.seed.map(|s| s.wrapping_add(i as u64)),
                ..config.clone()
            };
            EvolutionEngine::new(run_config)?.run(&mut SilentProgress)
        })
        .collect()
}

/// Fittest outcome of a batch; the earliest run wins ties
pub fn best_candidate(config: &EvolutionConfig, count: usize) -> Result<EvolutionOutcome> {
    let outcomes = evolve_candidates(config, count)?;
    let mut best: Option<EvolutionOutcome> = None;
    for outcome in outcomes {
        match &best {
            Some(current) if outcome.fitness <= current.fitness => {}
            _ => best = Some(outcome),
        }
    }
    best.ok_or_else(|| MuseError::Precondition("candidate count must be positive".to_string()))
}
