use super::traits::{invalid, ConfigSection};
use crate::error::MuseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub frequency_hz: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            duration_secs: 5.0,
            frequency_hz: 440.0,
        }
    }
}

impl ConfigSection for SynthesisConfig {
    fn section_name() -> &'static str {
        "synthesis"
    }

    fn validate(&self) -> Result<(), MuseError> {
        if self.sample_rate == 0 {
            return Err(invalid::<Self>("Sample rate must be positive"));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(invalid::<Self>("Duration must be a positive number of seconds"));
        }
        let nyquist = self.sample_rate as f64 / 2.0;
        if !(self.frequency_hz > 0.0 && self.frequency_hz < nyquist) {
            return Err(invalid::<Self>(format!(
                "Frequency must be between 0 and {} Hz",
                nyquist
            )));
        }
        Ok(())
    }
}
