use super::{
    evolution::EvolutionConfig,
    generators::{ProceduralConfig, RuleBasedConfig},
    midi::MidiConfig,
    synthesis::SynthesisConfig,
    traits::ConfigSection,
};
use crate::error::MuseError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub midi: MidiConfig,
    pub synthesis: SynthesisConfig,
    pub procedural: ProceduralConfig,
    pub rule_based: RuleBasedConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), MuseError> {
        self.evolution.validate()?;
        self.midi.validate()?;
        self.synthesis.validate()?;
        self.procedural.validate()?;
        self.rule_based.validate()?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, MuseError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| MuseError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MuseError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MuseError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config = AppConfig::from_toml_str(&contents)?;
        log::info!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MuseError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| MuseError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| MuseError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to a copy of the configuration; the change is kept only if
    /// the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), MuseError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }
}
