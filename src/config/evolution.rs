use super::traits::{invalid, ConfigSection};
use crate::error::MuseError;
use crate::types::{Pitch, PitchRange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub sequence_length: usize,
    pub pitch_low: Pitch,
    pub pitch_high: Pitch,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 100,
            mutation_rate: 0.01,
            sequence_length: 16,
            pitch_low: 60,
            pitch_high: 72,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn pitch_range(&self) -> Result<PitchRange, MuseError> {
        PitchRange::new(self.pitch_low, self.pitch_high)
            .map_err(|e| invalid::<Self>(e.to_string()))
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), MuseError> {
        if self.population_size == 0 {
            return Err(invalid::<Self>("Population size must be positive"));
        }
        // Breeding draws two distinct parents
        if self.num_generations > 0 && self.population_size < 2 {
            return Err(invalid::<Self>(
                "Population size must be at least 2 when generations > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid::<Self>("Mutation rate must be between 0 and 1"));
        }
        if self.sequence_length < 2 {
            return Err(invalid::<Self>("Sequence length must be at least 2"));
        }
        self.pitch_range()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            EvolutionConfig { population_size: 0, ..Default::default() },
            EvolutionConfig { population_size: 1, ..Default::default() },
            EvolutionConfig { mutation_rate: 1.5, ..Default::default() },
            EvolutionConfig { mutation_rate: f64::NAN, ..Default::default() },
            EvolutionConfig { sequence_length: 1, ..Default::default() },
            EvolutionConfig { pitch_low: 72, pitch_high: 60, ..Default::default() },
        ];
        for config in &bad {
            assert!(
                matches!(config.validate(), Err(MuseError::Configuration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_single_individual_allowed_without_breeding() {
        let config = EvolutionConfig {
            population_size: 1,
            num_generations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
