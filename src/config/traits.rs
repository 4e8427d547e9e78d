use crate::error::MuseError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), MuseError>;
}

/// Shorthand for the section-prefixed error every `validate` produces
pub(crate) fn invalid<S: ConfigSection>(message: impl Into<String>) -> MuseError {
    MuseError::Configuration(format!("[{}] {}", S::section_name(), message.into()))
}
