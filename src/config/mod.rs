pub mod traits;
pub mod evolution;
pub mod midi;
pub mod synthesis;
pub mod generators;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use midi::MidiConfig;
pub use synthesis::SynthesisConfig;
pub use generators::{ProceduralConfig, RuleBasedConfig};
pub use traits::ConfigSection;
