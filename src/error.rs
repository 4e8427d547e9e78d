use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuseError {
    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Rule error: {0}")]
    Rules(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("MIDI error: {0}")]
    Midi(#[from] midly::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

impl MuseError {
    /// True for errors caused by a caller breaking an operation's contract,
    /// as opposed to I/O or configuration problems.
    pub fn is_precondition(&self) -> bool {
        matches!(self, MuseError::Precondition(_))
    }
}

pub type Result<T> = std::result::Result<T, MuseError>;
