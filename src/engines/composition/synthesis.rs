use crate::error::{MuseError, Result};
use std::f64::consts::TAU;
use std::path::Path;

const AMPLITUDE: f64 = 0.5;

/// Mono audio in the range [-1, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Write as 16-bit PCM mono WAV
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;

        log::info!(
            "Wrote {:.2}s of audio at {} Hz to {}",
            self.duration_secs(),
            self.sample_rate,
            path.display()
        );
        Ok(())
    }
}

/// Pure sine tone at half amplitude
pub fn generate_tone(frequency_hz: f64, duration_secs: f64, sample_rate: u32) -> Result<Waveform> {
    if sample_rate == 0 {
        return Err(MuseError::Precondition("sample rate must be positive".to_string()));
    }
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        return Err(MuseError::Precondition(format!(
            "tone duration must be positive, got {}",
            duration_secs
        )));
    }
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(MuseError::Precondition(format!(
            "tone frequency must be positive, got {}",
            frequency_hz
        )));
    }

    let count = (sample_rate as f64 * duration_secs) as usize;
    let mut samples = Vec::new();
    samples.try_reserve_exact(count).map_err(|e| {
        MuseError::ResourceExhausted(format!("cannot allocate {} samples: {}", count, e))
    })?;

    let step = TAU * frequency_hz / sample_rate as f64;
    samples.extend((0..count).map(|i| (AMPLITUDE * (step * i as f64).sin()) as f32));

    Ok(Waveform {
        samples,
        sample_rate,
    })
}
