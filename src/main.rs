// Melodic Muse CLI entry point.
//
// Usage:
//   melodic_muse --technique <rule_based|procedural|genetic_algorithm|sound_synthesis>
//     [--mood <upbeat|melancholic|mysterious|energetic>] [--output PATH]
//     [--config PATH] [--seed N] [--candidates N]

use anyhow::{Context, Result};
use melodic_muse::config::ConfigManager;
use melodic_muse::engines::composition::{compose, Composition};
use melodic_muse::engines::encoding::sequence_to_timed_notes;
use melodic_muse::engines::generation::best_candidate;
use melodic_muse::types::{Mood, Technique};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

const DEFAULT_OUTPUT_FILE: &str = "output_song.midi";
const DEFAULT_WAV_FILE: &str = "output_tone.wav";

const FLAGS: &[&str] = &[
    "--technique",
    "--mood",
    "--output",
    "--config",
    "--seed",
    "--candidates",
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    check_flags(&args)?;

    let technique: Technique = flag_value(&args, "--technique")
        .context("--technique is required (rule_based, procedural, genetic_algorithm, sound_synthesis)")?
        .parse::<Technique>()?;
    let mood: Option<Mood> = flag_value(&args, "--mood").map(str::parse::<Mood>).transpose()?;
    let seed: Option<u64> = parse_flag(&args, "--seed")?;
    let candidates: usize = parse_flag(&args, "--candidates")?.unwrap_or(1);
    let output = flag_value(&args, "--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| match technique {
            Technique::Synthesis => PathBuf::from(DEFAULT_WAV_FILE),
            _ => PathBuf::from(DEFAULT_OUTPUT_FILE),
        });

    let manager = ConfigManager::new();
    if let Some(path) = flag_value(&args, "--config") {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path))?;
    }
    if seed.is_some() {
        manager.update(|c| c.evolution.seed = seed)?;
    }
    let config = manager.get();

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let composition = if technique == Technique::Genetic && candidates > 1 {
        let outcome = best_candidate(&config.evolution, candidates)?;
        log::info!("Best of {} candidates has fitness {:.4}", candidates, outcome.fitness);
        Composition::Melody(sequence_to_timed_notes(
            outcome.best.pitches(),
            config.midi.ticks_per_beat,
        ))
    } else {
        compose(technique, mood, &config, &mut rng)?
    };

    composition
        .save(&output, &config)
        .with_context(|| format!("saving output to {}", output.display()))?;
    println!("Generated output saved as '{}'.", output.display());

    Ok(())
}

/// Every argument after the program name must be a known flag followed by
/// its value
fn check_flags(args: &[String]) -> Result<()> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if !FLAGS.contains(&arg.as_str()) {
            anyhow::bail!(
                "unrecognized argument '{}' (expected one of: {})",
                arg,
                FLAGS.join(", ")
            );
        }
        rest.next()
            .with_context(|| format!("{} expects a value", arg))?;
    }
    Ok(())
}

/// Value following `name`, if present
fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T>(args: &[String], name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag_value(args, name)
        .map(|v| v.parse::<T>().with_context(|| format!("invalid value '{}' for {}", v, name)))
        .transpose()
}
