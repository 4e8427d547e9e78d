use melodic_muse::config::EvolutionConfig;
use melodic_muse::engines::generation::fitness::{evaluate, fittest_index};
use melodic_muse::engines::generation::operators::{random_population, select_parents};
use melodic_muse::engines::generation::{
    EvolutionEngine, EvolutionPhase, NoteSequence, ProgressCallback, SilentProgress,
};
use melodic_muse::types::PitchRange;
use melodic_muse::MuseError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Records every callback so tests can count generations
#[derive(Default)]
struct RecordingProgress {
    started: Vec<usize>,
    completed: Vec<(usize, f64, f64)>,
}

impl ProgressCallback for RecordingProgress {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64) {
        self.completed.push((generation, best_fitness, mean_fitness));
    }
}

fn create_test_config(
    population_size: usize,
    num_generations: usize,
    sequence_length: usize,
    mutation_rate: f64,
) -> EvolutionConfig {
    EvolutionConfig {
        population_size,
        num_generations,
        mutation_rate,
        sequence_length,
        pitch_low: 60,
        pitch_high: 72,
        seed: Some(42),
    }
}

#[test]
fn test_runs_exactly_g_generations() {
    for generations in [0, 1, 7, 25] {
        let config = create_test_config(10, generations, 8, 0.05);
        let mut progress = RecordingProgress::default();
        let mut engine = EvolutionEngine::new(config).unwrap();
        let outcome = engine.run(&mut progress).unwrap();

        assert_eq!(progress.started, (0..generations).collect::<Vec<_>>());
        assert_eq!(progress.completed.len(), generations);
        assert_eq!(outcome.generations, generations);
        assert_eq!(outcome.best.len(), 8);
        assert!(outcome.best.within(PitchRange::MIDDLE_OCTAVE));
        assert_eq!(engine.phase(), EvolutionPhase::Terminated);
    }
}

#[test]
fn test_progress_fitness_in_unit_interval() {
    let config = create_test_config(30, 15, 12, 0.01);
    let mut progress = RecordingProgress::default();
    EvolutionEngine::new(config).unwrap().run(&mut progress).unwrap();

    for (_, best, mean) in &progress.completed {
        assert!(*best > 0.0 && *best <= 1.0);
        assert!(*mean > 0.0 && *mean <= *best + 1e-12);
    }
}

#[test]
fn test_scenario_small_octave_no_mutation() {
    let config = EvolutionConfig {
        population_size: 4,
        num_generations: 1,
        mutation_rate: 0.0,
        sequence_length: 4,
        pitch_low: 60,
        pitch_high: 64,
        seed: Some(7),
    };
    let outcome = EvolutionEngine::new(config).unwrap().run(&mut SilentProgress).unwrap();

    assert_eq!(outcome.best.len(), 4);
    assert!(outcome.best.iter().all(|p| (60..64).contains(p)));
}

#[test]
fn test_scenario_zero_generations_returns_initial_fittest() {
    let config = create_test_config(20, 0, 6, 0.5);

    let mut rng = StdRng::seed_from_u64(42);
    let initial = random_population(20, 6, PitchRange::MIDDLE_OCTAVE, &mut rng).unwrap();
    let best_idx = fittest_index(&evaluate(&initial)).unwrap();

    let outcome = EvolutionEngine::new(config).unwrap().run(&mut SilentProgress).unwrap();
    assert_eq!(outcome.best, initial[best_idx]);
}

#[test]
fn test_scenario_roulette_favours_fitter_parent() {
    let fit = NoteSequence::new(vec![60, 61, 62, 63, 64, 65, 66, 67]).unwrap();
    let weak = NoteSequence::new(vec![60; 8]).unwrap();
    let population = vec![fit.clone(), weak.clone()];
    let scores = vec![1.0, 0.01];

    let mut rng = StdRng::seed_from_u64(1234);
    let mut fit_first = 0usize;
    let mut weak_first = 0usize;
    for _ in 0..5000 {
        let (a, b) = select_parents(&population, &scores, &mut rng).unwrap();
        assert_ne!(a, b);
        if *a == fit {
            fit_first += 1;
        } else {
            assert_eq!(*a, weak);
            weak_first += 1;
        }
    }

    assert!(weak_first > 0, "weaker parent must be selectable first");
    assert!(fit_first > 0, "fitter parent must be selectable first");
    assert!(fit_first > 20 * weak_first);
}

#[test]
fn test_invalid_configuration_aborts_before_running() {
    let cases = [
        create_test_config(10, 5, 1, 0.1),
        create_test_config(10, 5, 8, -0.5),
        create_test_config(0, 5, 8, 0.1),
        EvolutionConfig {
            pitch_low: 70,
            pitch_high: 70,
            ..create_test_config(10, 5, 8, 0.1)
        },
    ];
    for config in cases {
        assert!(matches!(
            EvolutionEngine::new(config),
            Err(MuseError::Configuration(_))
        ));
    }
}

#[test]
fn test_long_run_keeps_a_diverse_winner() {
    // Length 8 over 12 pitches: a random sequence averages about 6 distinct pitches
    let config = create_test_config(60, 60, 8, 0.02);
    let outcome = EvolutionEngine::new(config).unwrap().run(&mut SilentProgress).unwrap();

    assert_eq!(outcome.best.len(), 8);
    assert!(outcome.fitness >= 0.75, "best fitness {}", outcome.fitness);
}
