use super::traits::{invalid, ConfigSection};
use crate::error::MuseError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProceduralConfig {
    pub pattern_length: usize,
}

impl Default for ProceduralConfig {
    fn default() -> Self {
        Self { pattern_length: 16 }
    }
}

impl ConfigSection for ProceduralConfig {
    fn section_name() -> &'static str {
        "procedural"
    }

    fn validate(&self) -> Result<(), MuseError> {
        if self.pattern_length == 0 {
            return Err(invalid::<Self>("Pattern length must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBasedConfig {
    pub rules_file: PathBuf,
}

impl Default for RuleBasedConfig {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from("rules.json"),
        }
    }
}

impl ConfigSection for RuleBasedConfig {
    fn section_name() -> &'static str {
        "rule_based"
    }

    fn validate(&self) -> Result<(), MuseError> {
        if self.rules_file.as_os_str().is_empty() {
            return Err(invalid::<Self>("Rules file path must not be empty"));
        }
        Ok(())
    }
}
