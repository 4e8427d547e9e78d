use super::procedural::generate_pattern;
use super::rule_based::{rule_notes_to_timed, RuleBook};
use super::synthesis::{generate_tone, Waveform};
use crate::config::AppConfig;
use crate::engines::encoding::{encode_events, sequence_to_timed_notes, MidiWriter};
use crate::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use crate::error::Result;
use crate::types::{Mood, Technique, TimedNote};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// What a technique produces
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    Melody(Vec<TimedNote>),
    Waveform(Waveform),
}

impl Composition {
    /// Write a melody as MIDI or a waveform as WAV
    pub fn save(&self, path: &Path, config: &AppConfig) -> Result<()> {
        match self {
            Composition::Melody(notes) => {
                let events = encode_events(notes, config.midi.velocity)?;
                MidiWriter::new(config.midi.clone())?.write(&events, path)
            }
            Composition::Waveform(waveform) => waveform.write_wav(path),
        }
    }
}

/// Produce a composition with the chosen technique.
///
/// The evolutionary technique ignores `mood`: its fitness only rewards pitch
/// diversity. It seeds from `config.evolution.seed`; the other techniques
/// draw from `rng`.
pub fn compose(
    technique: Technique,
    mood: Option<Mood>,
    config: &AppConfig,
    rng: &mut StdRng,
) -> Result<Composition> {
    config.validate()?;
    log::info!(
        "Composing with technique '{}'{}",
        technique,
        mood.map(|m| format!(", mood '{}'", m)).unwrap_or_default()
    );

    let ticks_per_beat = config.midi.ticks_per_beat;
    match technique {
        Technique::RuleBased => {
            let book = RuleBook::load(&config.rule_based.rules_file)?;
            let notes = rule_notes_to_timed(book.apply(mood)?, ticks_per_beat)?;
            Ok(Composition::Melody(notes))
        }
        Technique::Procedural => {
            let notes = generate_pattern(config.procedural.pattern_length, mood, ticks_per_beat, rng)?;
            Ok(Composition::Melody(notes))
        }
        Technique::Genetic => {
            if mood.is_some() {
                log::debug!("Mood has no effect on the evolutionary technique");
            }
            let engine_rng = match config.evolution.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::seed_from_u64(rng.gen()),
            };
            let mut engine = EvolutionEngine::with_rng(config.evolution.clone(), engine_rng)?;
            let mut progress = ConsoleProgressCallback::new(config.evolution.num_generations);
            let outcome = engine.run(&mut progress)?;
            Ok(Composition::Melody(sequence_to_timed_notes(
                outcome.best.pitches(),
                ticks_per_beat,
            )))
        }
        Technique::Synthesis => {
            let synth = &config.synthesis;
            let waveform = generate_tone(synth.frequency_hz, synth.duration_secs, synth.sample_rate)?;
            Ok(Composition::Waveform(waveform))
        }
    }
}
