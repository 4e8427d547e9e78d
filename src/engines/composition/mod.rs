pub mod procedural;
pub mod rule_based;
pub mod synthesis;
pub mod composer;

pub use composer::{compose, Composition};
pub use procedural::generate_pattern;
pub use rule_based::RuleBook;
pub use synthesis::{generate_tone, Waveform};
