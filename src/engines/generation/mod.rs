pub mod genome;
pub mod fitness;
pub mod operators;
pub mod evolution_engine;
pub mod progress;
pub mod batch;

pub use genome::{NoteSequence, Population};
pub use fitness::fitness;
pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, EvolutionPhase, ProgressCallback};
pub use progress::{ConsoleProgressCallback, SilentProgress};
pub use batch::{best_candidate, evolve_candidates};
