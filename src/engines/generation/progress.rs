use super::evolution_engine::ProgressCallback;

/// Reports generation progress through the `log` facade
pub struct ConsoleProgressCallback {
    total_generations: usize,
}

impl ConsoleProgressCallback {
    pub fn new(total_generations: usize) -> Self {
        Self { total_generations }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {}/{} starting...", generation + 1, self.total_generations);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64) {
        log::info!(
            "Generation {}/{} complete. Best fitness: {:.4}, mean: {:.4}",
            generation + 1,
            self.total_generations,
            best_fitness,
            mean_fitness
        );
    }
}

/// Discards all progress
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _mean_fitness: f64) {}
}
