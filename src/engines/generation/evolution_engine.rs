use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::generation::{
    fitness::{evaluate, fittest_index},
    genome::{NoteSequence, Population},
    operators::{crossover, empty_population, mutate, random_population, select_parents},
};
use crate::error::{MuseError, Result};
use crate::types::PitchRange;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where the engine is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionPhase {
    Initialized,
    Evaluating,
    Breeding,
    Terminated,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    pub best: NoteSequence,
    pub fitness: f64,
    pub generations: usize,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64);
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    pitch_range: PitchRange,
    rng: StdRng,
    phase: EvolutionPhase,
}

impl EvolutionEngine {
    /// Build an engine seeded from `config.seed`, or from OS entropy when unset
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: EvolutionConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let pitch_range = config.pitch_range()?;

        Ok(Self {
            config,
            pitch_range,
            rng,
            phase: EvolutionPhase::Initialized,
        })
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Run the evolution process. The engine is terminated afterwards whether
    /// or not the run succeeded.
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<EvolutionOutcome> {
        if self.phase == EvolutionPhase::Terminated {
            return Err(MuseError::Precondition(
                "evolution engine has already completed a run".to_string(),
            ));
        }

        let outcome = self.evolve(callback);
        self.phase = EvolutionPhase::Terminated;
        outcome
    }

    fn evolve<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<EvolutionOutcome> {
        log::info!(
            "Evolving {} melodies of length {} for {} generations (mutation rate {})",
            self.config.population_size,
            self.config.sequence_length,
            self.config.num_generations,
            self.config.mutation_rate
        );

        let mut population = self.initialize_population()?;

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            self.phase = EvolutionPhase::Evaluating;
            let scores = evaluate(&population);

            self.phase = EvolutionPhase::Breeding;
            population = self.create_next_generation(&population, &scores)?;

            let best_fitness = scores.iter().copied().fold(0.0, f64::max);
            let mean_fitness = scores.iter().sum::<f64>() / scores.len() as f64;
            callback.on_generation_complete(generation, best_fitness, mean_fitness);
        }

        let final_scores = evaluate(&population);
        let best_idx = fittest_index(&final_scores).ok_or_else(|| {
            MuseError::Precondition("final population is empty".to_string())
        })?;
        let fitness = final_scores[best_idx];
        let best = population.swap_remove(best_idx);

        log::info!("Evolution finished. Best fitness: {:.4}", fitness);

        Ok(EvolutionOutcome {
            best,
            fitness,
            generations: self.config.num_generations,
        })
    }

    fn initialize_population(&mut self) -> Result<Population> {
        random_population(
            self.config.population_size,
            self.config.sequence_length,
            self.pitch_range,
            &mut self.rng,
        )
    }

    /// Breed a full replacement population from `current`; nothing carries over
    fn create_next_generation(
        &mut self,
        current: &[NoteSequence],
        scores: &[f64],
    ) -> Result<Population> {
        let mut next_generation =
            empty_population(self.config.population_size, self.config.sequence_length)?;

        while next_generation.len() < self.config.population_size {
            let (parent1, parent2) = select_parents(current, scores, &mut self.rng)?;
            let child = crossover(parent1, parent2, &mut self.rng)?;
            let child = mutate(&child, self.config.mutation_rate, self.pitch_range, &mut self.rng)?;
            next_generation.push(child);
        }

        Ok(next_generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::fitness::fitness;
    use crate::engines::generation::progress::SilentProgress;

    fn config(population_size: usize, num_generations: usize) -> EvolutionConfig {
        EvolutionConfig {
            population_size,
            num_generations,
            mutation_rate: 0.05,
            sequence_length: 8,
            pitch_low: 60,
            pitch_high: 72,
            seed: Some(17),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(10, 5);
        bad.mutation_rate = 3.0;
        assert!(matches!(
            EvolutionEngine::new(bad),
            Err(MuseError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_generations_returns_fittest_initial() {
        let cfg = config(12, 0);

        // Same seed, so the initial population matches what the engine builds
        let mut rng = StdRng::seed_from_u64(17);
        let initial = random_population(12, 8, PitchRange::MIDDLE_OCTAVE, &mut rng).unwrap();
        let scores = evaluate(&initial);
        let expected = &initial[fittest_index(&scores).unwrap()];

        let mut engine = EvolutionEngine::new(cfg).unwrap();
        let outcome = engine.run(&mut SilentProgress).unwrap();

        assert_eq!(&outcome.best, expected);
        assert_eq!(outcome.generations, 0);
        assert_eq!(engine.phase(), EvolutionPhase::Terminated);
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = EvolutionEngine::new(config(10, 5)).unwrap().run(&mut SilentProgress).unwrap();
        let b = EvolutionEngine::new(config(10, 5)).unwrap().run(&mut SilentProgress).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reported_fitness_matches_winner() {
        let outcome = EvolutionEngine::new(config(20, 10))
            .unwrap()
            .run(&mut SilentProgress)
            .unwrap();
        assert_eq!(outcome.fitness, fitness(&outcome.best));
    }

    #[test]
    fn test_engine_runs_once() {
        let mut engine = EvolutionEngine::new(config(4, 1)).unwrap();
        engine.run(&mut SilentProgress).unwrap();
        assert!(engine.run(&mut SilentProgress).unwrap_err().is_precondition());
    }

    #[test]
    fn test_oversized_melody_is_resource_exhaustion() {
        let mut cfg = config(2, 0);
        cfg.sequence_length = isize::MAX as usize / 2;

        let mut engine = EvolutionEngine::new(cfg).unwrap();
        let err = engine.run(&mut SilentProgress).unwrap_err();
        assert!(matches!(err, MuseError::ResourceExhausted(_)));

        // A failed run still terminates the engine
        assert_eq!(engine.phase(), EvolutionPhase::Terminated);
        assert!(engine.run(&mut SilentProgress).unwrap_err().is_precondition());
    }
}
